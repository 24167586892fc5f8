// ABOUTME: Ramp-rate analysis - week-over-week load change, severity tiers and reductions
// ABOUTME: Pure functions over bucketed weekly totals; the monitor owns fetching and state
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Week-over-week ramp analysis.
//!
//! Boundary rule: a ramp rate strictly greater than the tier threshold
//! exceeds it; a ramp exactly at the threshold is safe. This one rule is
//! applied everywhere ramp rates are compared.

use crate::config::GuardrailThresholds;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Severity multipliers on the tier threshold
const MODERATE_FACTOR: f64 = 1.2;
const HIGH_FACTOR: f64 = 1.5;

/// Excess ramp is converted to extra reduction at this rate
const EXCESS_REDUCTION_RATE: f64 = 0.5;

/// Hard cap on any computed reduction
pub const MAX_REDUCTION: f64 = 0.5;

/// Total load for one 7-day bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeeklyTotal {
    /// First day of the bucket
    pub week_start: NaiveDate,
    /// Summed session load over the bucket
    pub total: f64,
}

/// Severity of a ramp-rate breach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RampSeverity {
    /// Above the threshold but within 1.2x
    Low,
    /// Above 1.2x the threshold
    Moderate,
    /// Above 1.5x the threshold
    High,
}

/// Result of comparing consecutive weekly loads
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RampAnalysis {
    /// Fractional change from the previous week to the current one
    pub ramp_rate: f64,
    /// Severity relative to the tier threshold
    pub severity: RampSeverity,
    /// Immediately-preceding week pairs that also exceeded the threshold
    pub consecutive_increases: u32,
    /// Suggested HIIT reduction, capped at [`MAX_REDUCTION`]
    pub recommended_reduction: f64,
}

/// Fractional week-over-week change; a zero or negative previous week
/// yields 0 rather than dividing by zero
#[must_use]
pub fn calculate_ramp_rate(current: f64, previous: f64) -> f64 {
    if previous <= 0.0 {
        0.0
    } else {
        (current - previous) / previous
    }
}

/// Whether a ramp rate breaches the threshold (strictly greater; at the
/// threshold is safe)
#[must_use]
pub fn exceeds_threshold(ramp_rate: f64, threshold: f64) -> bool {
    ramp_rate > threshold
}

/// Reduction for a breach: the tier baseline plus half the excess, capped
#[must_use]
pub fn hiit_reduction(thresholds: &GuardrailThresholds, ramp_rate: f64) -> f64 {
    let excess = (ramp_rate - thresholds.max_weekly_increase).max(0.0);
    EXCESS_REDUCTION_RATE
        .mul_add(excess, thresholds.hiit_reduction)
        .min(MAX_REDUCTION)
}

/// Analyze the latest week pair against the tier threshold.
///
/// `weekly_totals` is ordered oldest first and must hold at least two
/// entries. `consecutive_increases` counts how many immediately-preceding
/// pairs also exceeded the threshold, stopping at the first pair that
/// didn't.
#[must_use]
pub fn analyze_ramp_rate(
    weekly_totals: &[WeeklyTotal],
    thresholds: &GuardrailThresholds,
) -> RampAnalysis {
    let len = weekly_totals.len();
    let current = weekly_totals.get(len.wrapping_sub(1)).map_or(0.0, |w| w.total);
    let previous = weekly_totals.get(len.wrapping_sub(2)).map_or(0.0, |w| w.total);

    let ramp_rate = calculate_ramp_rate(current, previous);
    let threshold = thresholds.max_weekly_increase;

    let severity = if ramp_rate > threshold * HIGH_FACTOR {
        RampSeverity::High
    } else if ramp_rate > threshold * MODERATE_FACTOR {
        RampSeverity::Moderate
    } else {
        RampSeverity::Low
    };

    let mut consecutive_increases = 0;
    let mut index = len.wrapping_sub(2);
    while index >= 1 && index < len {
        let pair_ramp =
            calculate_ramp_rate(weekly_totals[index].total, weekly_totals[index - 1].total);
        if exceeds_threshold(pair_ramp, threshold) {
            consecutive_increases += 1;
            index -= 1;
        } else {
            break;
        }
    }

    RampAnalysis {
        ramp_rate,
        severity,
        consecutive_increases,
        recommended_reduction: hiit_reduction(thresholds, ramp_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExperienceLevel;

    fn totals(values: &[f64]) -> Vec<WeeklyTotal> {
        values
            .iter()
            .enumerate()
            .map(|(i, &total)| WeeklyTotal {
                week_start: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
                    + chrono::Duration::weeks(i as i64),
                total,
            })
            .collect()
    }

    fn intermediate() -> GuardrailThresholds {
        GuardrailThresholds::for_level(ExperienceLevel::Intermediate)
    }

    #[test]
    fn test_exact_threshold_is_safe() {
        // 200 -> 220 is exactly +10%, the intermediate threshold
        let ramp = calculate_ramp_rate(220.0, 200.0);
        assert!((ramp - 0.10).abs() < 1e-12);
        assert!(!exceeds_threshold(ramp, 0.10));

        let ramp = calculate_ramp_rate(221.0, 200.0);
        assert!(exceeds_threshold(ramp, 0.10));
    }

    #[test]
    fn test_zero_previous_week_yields_zero_ramp() {
        assert!((calculate_ramp_rate(150.0, 0.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_severity_tiers() {
        let thresholds = intermediate();
        // threshold 0.10: >0.15 high, >0.12 moderate
        let analysis = analyze_ramp_rate(&totals(&[100.0, 111.0]), &thresholds);
        assert_eq!(analysis.severity, RampSeverity::Low);

        let analysis = analyze_ramp_rate(&totals(&[100.0, 113.0]), &thresholds);
        assert_eq!(analysis.severity, RampSeverity::Moderate);

        let analysis = analyze_ramp_rate(&totals(&[100.0, 120.0]), &thresholds);
        assert_eq!(analysis.severity, RampSeverity::High);
    }

    #[test]
    fn test_consecutive_increases_stop_at_first_safe_pair() {
        let thresholds = intermediate();
        // 100 -> 105 (+5%, safe), 105 -> 120 (+14%), 120 -> 140 (+17%), 140 -> 165 (+18%)
        let analysis = analyze_ramp_rate(&totals(&[100.0, 105.0, 120.0, 140.0, 165.0]), &thresholds);
        assert_eq!(analysis.consecutive_increases, 2);
    }

    #[test]
    fn test_recommended_reduction_capped() {
        let thresholds = intermediate();
        let analysis = analyze_ramp_rate(&totals(&[100.0, 300.0]), &thresholds);
        assert!((analysis.recommended_reduction - MAX_REDUCTION).abs() < f64::EPSILON);

        // small excess: 0.20 + (0.14 - 0.10) x 0.5 = 0.22
        let reduction = hiit_reduction(&thresholds, 0.14);
        assert!((reduction - 0.22).abs() < 1e-12);
    }
}
