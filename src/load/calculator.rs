// ABOUTME: Aggregate load calculator - weekly summaries, recovery debt, overtraining risk
// ABOUTME: Turns collections of sessions and activities into bounded training recommendations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Load aggregation and risk assessment.
//!
//! All functions here are pure over their input slices; fetching sessions
//! and activities from the stores happens in the guardrail layer, which also
//! owns the absorb-errors-into-structured-outcomes policy. A malformed
//! session contributes zero load rather than aborting an aggregate.

use super::constants::{recovery, risk, spike};
use crate::config::weekly_load_target;
use crate::models::{ExperienceLevel, ExternalActivity, IntensityZone, Session};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Days in the aggregation window
const WEEK_DAYS: f64 = 7.0;

/// Multiplier applied to the running intensity load when a session contains
/// interval blocks in the top two zones
const INTERVAL_INTENSITY_MULTIPLIER: f64 = 1.3;

/// Multiplier applied after the interval multiplier for agility or
/// change-of-direction tagged work
const AGILITY_INTENSITY_MULTIPLIER: f64 = 1.2;

/// Lower and upper bounds on the weekly recommendation window
const WEEKLY_LOW_FACTOR: f64 = 0.7;
const WEEKLY_HIGH_FACTOR: f64 = 1.3;

/// Bounds applied to load ratios before thresholding, guarding against
/// pathological ratios from near-zero denominators
const RATIO_MIN: f64 = 0.1;
const RATIO_MAX: f64 = 10.0;

/// Per-session load breakdown
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionLoad {
    /// Combined volume and intensity load
    pub total: f64,
    /// Mechanical volume, sets x reps x weight
    pub volume: f64,
    /// Exertion-weighted load
    pub intensity: f64,
    /// Volume share of total, clamped to [0,1]
    pub volume_ratio: f64,
    /// Intensity share of total, clamped to [0,1]
    pub intensity_ratio: f64,
}

/// Weekly load verdict relative to the experience-tier target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeeklyRecommendation {
    /// Below 0.7x the tier target
    Low,
    /// Within the target window
    Optimal,
    /// Above 1.3x the tier target
    High,
}

/// Suggested character of the next training day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NextDayIntensity {
    /// Easy or off day
    Recovery,
    /// Normal training
    Moderate,
    /// Room for a hard day
    High,
}

/// Aggregate over a 7-day window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyLoadSummary {
    /// Total load across the window
    pub total_load: f64,
    /// Volume component
    pub volume_load: f64,
    /// Intensity component
    pub intensity_load: f64,
    /// Total divided by seven days
    pub average_daily_load: f64,
    /// Largest single-day load
    pub peak_daily_load: f64,
    /// Coefficient of variation across days (0 when the mean is 0)
    pub load_variation: f64,
    /// Per-day load breakdown
    pub daily: BTreeMap<NaiveDate, f64>,
    /// Verdict relative to the tier weekly target
    pub recommendation: WeeklyRecommendation,
    /// Suggested character of the next day
    pub next_day_intensity: NextDayIntensity,
}

/// Four-tier recovery status by accumulated debt hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Under 12 hours of debt
    Excellent,
    /// Under 24 hours
    Good,
    /// Under 48 hours
    Moderate,
    /// 48 hours or more
    Poor,
}

/// Per-activity recovery cost rolled up into a status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryDebt {
    /// Total unresolved recovery hours
    pub total_debt_hours: f64,
    /// Debt summed per activity type
    pub by_type: BTreeMap<String, f64>,
    /// Rolled-up status level
    pub status: RecoveryStatus,
    /// Prioritized plain-language recommendations
    pub recommendations: Vec<String>,
}

/// Overtraining risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score below 3
    Low,
    /// Score 3 or 4
    Medium,
    /// Score 5 and above
    High,
}

/// Overtraining risk score and classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OvertrainingRisk {
    /// Accumulated risk points
    pub score: u32,
    /// Risk classification
    pub level: RiskLevel,
}

/// Priority of the combined recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    /// No action needed
    Low,
    /// Monitor and trim load
    Medium,
    /// Act now
    High,
}

/// Combined load-and-recovery recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedRecommendation {
    /// How urgently to act
    pub priority: RecommendationPriority,
    /// Multiplier to apply to planned intensity
    pub intensity_multiplier: f64,
    /// Multiplier to apply to planned volume
    pub volume_multiplier: f64,
    /// Plain-language notes suitable for display
    pub notes: Vec<String>,
}

/// Combined internal and external load picture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprehensiveLoad {
    /// Session-derived load, floored at 0
    pub internal_load: f64,
    /// Activity-derived load, floored at 0
    pub external_load: f64,
    /// Combined load
    pub total_load: f64,
    /// Recovery debt rollup
    pub recovery_debt: RecoveryDebt,
    /// Overtraining risk assessment
    pub risk: OvertrainingRisk,
    /// Derived recommendation
    pub recommendation: CombinedRecommendation,
}

/// Spike severity by current-to-trailing load ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpikeSeverity {
    /// Ratio at or below 1.1
    None,
    /// Ratio above 1.1
    Low,
    /// Ratio above 1.3
    Medium,
    /// Ratio above 1.5
    High,
}

/// Current load relative to the trailing week
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoadStatus {
    /// Combined load for the current day
    pub current_load: f64,
    /// Trailing 7-day average daily load, floored at 1
    pub trailing_average: f64,
    /// Current divided by trailing, clamped to [0.1, 10]
    pub load_ratio: f64,
    /// Spike classification
    pub spike: SpikeSeverity,
}

/// Bounded intensity and volume multipliers for upcoming workouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntensityRecommendation {
    /// Intensity multiplier, clamped to [0.3, 1.0]
    pub intensity: f64,
    /// Volume multiplier, clamped to [0.3, 1.0]
    pub volume: f64,
    /// Set when a recovery block should replace hard training
    pub recovery_recommended: bool,
    /// Plain-language reasoning
    pub rationale: Vec<String>,
}

/// Aggregates sessions and activities into weekly and comprehensive load
/// pictures for one athlete tier
#[derive(Debug, Clone, Copy)]
pub struct LoadCalculator {
    level: ExperienceLevel,
    weekly_target: f64,
}

impl LoadCalculator {
    /// Create a calculator for the given experience tier
    #[must_use]
    pub fn new(level: ExperienceLevel) -> Self {
        Self {
            level,
            weekly_target: weekly_load_target(level),
        }
    }

    /// The experience tier this calculator was built for
    #[must_use]
    pub const fn level(&self) -> ExperienceLevel {
        self.level
    }

    /// Per-session volume and intensity load.
    ///
    /// Interval blocks in Z4/Z5 scale the running intensity load by 1.3
    /// before the agility tag multiplier of 1.2; both apply to the running
    /// intensity load, not per exercise.
    #[must_use]
    pub fn calculate_session_load(session: &Session) -> SessionLoad {
        let mut volume_load = 0.0;
        let mut intensity_load = 0.0;

        for exercise in &session.exercises {
            let volume = f64::from(exercise.sets) * f64::from(exercise.reps) * exercise.weight;
            volume_load += volume;
            // present RPE values clamp to [1,10]; absent RPE contributes nothing
            let rpe = exercise
                .rpe
                .or(session.rpe)
                .map_or(0.0, |r| r.clamp(1.0, 10.0));
            intensity_load += volume * (rpe / 10.0);
        }

        for activity in &session.external_activities {
            volume_load += activity.training_stress_score;
            intensity_load += activity.training_stress_score;
        }

        let has_hard_intervals = session.structure.as_ref().is_some_and(|blocks| {
            blocks
                .iter()
                .any(|b| b.intensity.is_some_and(IntensityZone::is_high_intensity))
        });
        if has_hard_intervals {
            intensity_load *= INTERVAL_INTENSITY_MULTIPLIER;
        }
        if session.tags.contains("agility") || session.tags.contains("change_of_direction") {
            intensity_load *= AGILITY_INTENSITY_MULTIPLIER;
        }

        let volume = volume_load.max(0.0);
        let intensity = intensity_load.max(0.0);
        let total = (volume + intensity).max(0.0);
        let denominator = total.max(1.0);

        SessionLoad {
            total,
            volume,
            intensity,
            volume_ratio: (volume / denominator).clamp(0.0, 1.0),
            intensity_ratio: (intensity / denominator).clamp(0.0, 1.0),
        }
    }

    /// Aggregate a 7-day window of sessions into a weekly summary
    #[must_use]
    pub fn calculate_weekly_load(&self, sessions: &[Session]) -> WeeklyLoadSummary {
        let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        let mut total_load = 0.0;
        let mut volume_load = 0.0;
        let mut intensity_load = 0.0;

        for session in sessions {
            let load = Self::calculate_session_load(session);
            *daily.entry(session.date).or_insert(0.0) += load.total;
            total_load += load.total;
            volume_load += load.volume;
            intensity_load += load.intensity;
        }

        let average_daily_load = total_load / WEEK_DAYS;
        let peak_daily_load = daily.values().copied().fold(0.0, f64::max);
        let load_variation = Self::coefficient_of_variation(&daily);

        let recommendation = if total_load < self.weekly_target * WEEKLY_LOW_FACTOR {
            WeeklyRecommendation::Low
        } else if total_load > self.weekly_target * WEEKLY_HIGH_FACTOR {
            WeeklyRecommendation::High
        } else {
            WeeklyRecommendation::Optimal
        };

        let load_ratio = (total_load / self.weekly_target.max(1.0)).clamp(RATIO_MIN, RATIO_MAX);
        let daily_ratio = (peak_daily_load / average_daily_load.max(1.0)).clamp(RATIO_MIN, RATIO_MAX);
        let next_day_intensity = if load_ratio > WEEKLY_HIGH_FACTOR || daily_ratio > 2.0 {
            NextDayIntensity::Recovery
        } else if load_ratio < WEEKLY_LOW_FACTOR {
            NextDayIntensity::High
        } else {
            NextDayIntensity::Moderate
        };

        WeeklyLoadSummary {
            total_load,
            volume_load,
            intensity_load,
            average_daily_load,
            peak_daily_load,
            load_variation,
            daily,
            recommendation,
            next_day_intensity,
        }
    }

    /// Coefficient of variation over the seven days of the window; days with
    /// no sessions count as zero load
    fn coefficient_of_variation(daily: &BTreeMap<NaiveDate, f64>) -> f64 {
        let mut values: Vec<f64> = daily.values().copied().collect();
        while values.len() < WEEK_DAYS as usize {
            values.push(0.0);
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        if mean == 0.0 {
            return 0.0;
        }
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt() / mean
    }

    /// Sum recovery debt overall and per activity type, with status and advice
    #[must_use]
    pub fn calculate_recovery_debt(activities: &[ExternalActivity]) -> RecoveryDebt {
        let mut total_debt_hours = 0.0;
        let mut by_type: BTreeMap<String, f64> = BTreeMap::new();

        for activity in activities {
            total_debt_hours += activity.recovery_debt_hours;
            *by_type.entry(activity.activity_type.clone()).or_insert(0.0) +=
                activity.recovery_debt_hours;
        }

        let status = if total_debt_hours < recovery::EXCELLENT_BELOW {
            RecoveryStatus::Excellent
        } else if total_debt_hours < recovery::GOOD_BELOW {
            RecoveryStatus::Good
        } else if total_debt_hours < recovery::MODERATE_BELOW {
            RecoveryStatus::Moderate
        } else {
            RecoveryStatus::Poor
        };

        let mut recommendations = Vec::new();
        if total_debt_hours > recovery::REST_DAY_ABOVE {
            recommendations.push(format!(
                "Take a rest day: {total_debt_hours:.0}h of unresolved recovery debt"
            ));
        }
        for (activity_type, debt) in &by_type {
            if *debt > recovery::TYPE_ADVICE_ABOVE {
                recommendations.push(format!(
                    "Back off {activity_type} until its {debt:.0}h recovery debt clears"
                ));
            }
        }

        RecoveryDebt {
            total_debt_hours,
            by_type,
            status,
            recommendations,
        }
    }

    /// Score overtraining risk from combined load and recovery debt.
    ///
    /// Points: +3 when load exceeds 400 (else +2 above 300); +3 when debt
    /// exceeds 48h (else +2 above 24h). High at 5+, medium at 3+.
    #[must_use]
    pub fn assess_overtraining_risk(total_load: f64, recovery_debt_hours: f64) -> OvertrainingRisk {
        let mut score = 0;
        if total_load > risk::LOAD_HIGH {
            score += 3;
        } else if total_load > risk::LOAD_ELEVATED {
            score += 2;
        }
        if recovery_debt_hours > risk::DEBT_HIGH {
            score += 3;
        } else if recovery_debt_hours > risk::DEBT_ELEVATED {
            score += 2;
        }

        let level = if score >= risk::SCORE_HIGH {
            RiskLevel::High
        } else if score >= risk::SCORE_MEDIUM {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        OvertrainingRisk { score, level }
    }

    /// Combine internal (session) and external (activity) load with recovery
    /// debt into one recommendation
    #[must_use]
    pub fn calculate_comprehensive_load(
        &self,
        sessions: &[Session],
        activities: &[ExternalActivity],
    ) -> ComprehensiveLoad {
        let internal_load = sessions
            .iter()
            .map(|s| Self::calculate_session_load(s).total)
            .sum::<f64>()
            .max(0.0);
        let external_load = activities
            .iter()
            .map(|a| a.training_stress_score)
            .sum::<f64>()
            .max(0.0);
        let total_load = internal_load + external_load;

        let recovery_debt = Self::calculate_recovery_debt(activities);
        let risk = Self::assess_overtraining_risk(total_load, recovery_debt.total_debt_hours);

        let mut notes = Vec::new();
        let (priority, intensity_multiplier, volume_multiplier) = match risk.level {
            RiskLevel::High => {
                notes.push(format!(
                    "High overtraining risk (score {}): cut intensity and volume now",
                    risk.score
                ));
                (RecommendationPriority::High, 0.6, 0.6)
            }
            RiskLevel::Medium => {
                notes.push(format!(
                    "Elevated overtraining risk (score {}): trim the coming week",
                    risk.score
                ));
                (RecommendationPriority::Medium, 0.8, 0.8)
            }
            RiskLevel::Low => (RecommendationPriority::Low, 1.0, 1.0),
        };
        notes.extend(recovery_debt.recommendations.iter().cloned());

        ComprehensiveLoad {
            internal_load,
            external_load,
            total_load,
            recovery_debt,
            risk,
            recommendation: CombinedRecommendation {
                priority,
                intensity_multiplier,
                volume_multiplier,
                notes,
            },
        }
    }

    /// Compare today's combined load to the trailing 7-day average.
    ///
    /// The trailing average is floored at 1 so that a near-empty history
    /// cannot produce a divide-by-zero cascade; the ratio is clamped to
    /// [0.1, 10] before spike classification.
    #[must_use]
    pub fn current_load_status(
        sessions: &[Session],
        activities: &[ExternalActivity],
        today: NaiveDate,
    ) -> LoadStatus {
        let current_sessions: f64 = sessions
            .iter()
            .filter(|s| s.date == today)
            .map(|s| Self::calculate_session_load(s).total)
            .sum();
        let current_activities: f64 = activities
            .iter()
            .filter(|a| a.start_time.date_naive() == today)
            .map(|a| a.training_stress_score)
            .sum();
        let current_load = current_sessions + current_activities;

        let window_start = today - Duration::days(7);
        let trailing_total: f64 = sessions
            .iter()
            .filter(|s| s.date >= window_start && s.date < today)
            .map(|s| Self::calculate_session_load(s).total)
            .sum::<f64>()
            + activities
                .iter()
                .filter(|a| {
                    let date = a.start_time.date_naive();
                    date >= window_start && date < today
                })
                .map(|a| a.training_stress_score)
                .sum::<f64>();
        let trailing_average = (trailing_total / WEEK_DAYS).max(1.0);

        let load_ratio = (current_load / trailing_average).clamp(RATIO_MIN, RATIO_MAX);
        let spike = Self::detect_load_spike(load_ratio);

        LoadStatus {
            current_load,
            trailing_average,
            load_ratio,
            spike,
        }
    }

    /// Classify a clamped load ratio into a spike severity
    #[must_use]
    pub fn detect_load_spike(load_ratio: f64) -> SpikeSeverity {
        if load_ratio > spike::HIGH {
            SpikeSeverity::High
        } else if load_ratio > spike::MEDIUM {
            SpikeSeverity::Medium
        } else if load_ratio > spike::LOW {
            SpikeSeverity::Low
        } else {
            SpikeSeverity::None
        }
    }

    /// Bounded intensity and volume multipliers for upcoming workouts.
    ///
    /// `absolute_load` is the current combined load compared against 1.2x the
    /// tier weekly target for the absolute penalty.
    #[must_use]
    pub fn workout_intensity_recommendations(
        &self,
        status: &LoadStatus,
        absolute_load: f64,
    ) -> IntensityRecommendation {
        let mut intensity: f64 = 1.0;
        let mut volume: f64 = 1.0;
        let mut recovery_recommended = false;
        let mut rationale = Vec::new();

        if status.load_ratio > 1.3 {
            volume = 0.6;
            intensity *= 0.8;
            rationale.push("Load well above trailing average: cut volume and ease intensity".to_owned());
        } else if status.load_ratio > 1.0 {
            volume = 0.8;
            rationale.push("Load above trailing average: trim volume".to_owned());
        }

        if status.spike == SpikeSeverity::High {
            intensity = 0.5;
            volume = 0.3;
            recovery_recommended = true;
            rationale.push("High load spike: recovery block recommended".to_owned());
        }

        if absolute_load > 1.2 * self.weekly_target {
            intensity *= 0.8;
            volume *= 0.7;
            rationale.push(format!(
                "Absolute load above 1.2x the weekly target of {:.0}",
                self.weekly_target
            ));
        }

        IntensityRecommendation {
            intensity: intensity.clamp(0.3, 1.0),
            volume: volume.clamp(0.3, 1.0),
            recovery_recommended,
            rationale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockType, Exercise, IntervalBlock, IntensityZone};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn strength_session(day: u32, sets: u32, reps: u32, weight: f64, rpe: f64) -> Session {
        let mut session = Session::new(Uuid::new_v4(), date(day));
        session.exercises.push(Exercise {
            name: "squat".to_owned(),
            sets,
            reps,
            weight,
            rpe: Some(rpe),
            intensity_zone: None,
        });
        session
    }

    #[test]
    fn test_session_load_volume_and_intensity() {
        let session = strength_session(2, 5, 5, 100.0, 8.0);
        let load = LoadCalculator::calculate_session_load(&session);
        assert!((load.volume - 2500.0).abs() < f64::EPSILON);
        assert!((load.intensity - 2000.0).abs() < f64::EPSILON);
        assert!((load.total - 4500.0).abs() < f64::EPSILON);
        assert!(load.volume_ratio <= 1.0 && load.intensity_ratio <= 1.0);
    }

    #[test]
    fn test_hiit_multipliers_cumulative() {
        let mut session = strength_session(2, 4, 10, 20.0, 9.0);
        session.structure = Some(vec![IntervalBlock {
            block_type: BlockType::Interval,
            intensity: Some(IntensityZone::Z5),
            duration_minutes: None,
            sets: Some(8),
            work_duration_minutes: Some(0.5),
            description: None,
        }]);
        session.tags.insert("agility".to_owned());

        let load = LoadCalculator::calculate_session_load(&session);
        // base intensity 800 x 0.9 = 720, then x1.3 then x1.2
        assert!((load.intensity - 720.0 * 1.3 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_present_rpe_clamps_to_at_least_one() {
        // 0.5 is below the RPE scale floor and counts as 1
        let session = strength_session(2, 1, 10, 10.0, 0.5);
        let load = LoadCalculator::calculate_session_load(&session);
        assert!((load.volume - 100.0).abs() < f64::EPSILON);
        assert!((load.intensity - 10.0).abs() < f64::EPSILON);

        // absent RPE still contributes no intensity
        let mut session = Session::new(Uuid::new_v4(), date(2));
        session.exercises.push(Exercise {
            name: "row".to_owned(),
            sets: 3,
            reps: 10,
            weight: 20.0,
            rpe: None,
            intensity_zone: None,
        });
        let load = LoadCalculator::calculate_session_load(&session);
        assert!((load.intensity - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_session_loads_are_floored() {
        let session = Session::new(Uuid::new_v4(), date(2));
        let load = LoadCalculator::calculate_session_load(&session);
        assert!((load.total - 0.0).abs() < f64::EPSILON);
        assert!(load.volume_ratio >= 0.0);
    }

    #[test]
    fn test_weekly_summary_bounds() {
        let calculator = LoadCalculator::new(ExperienceLevel::Intermediate);
        let sessions: Vec<Session> = (1..=4)
            .map(|d| strength_session(d, 3, 10, 1.0, 5.0))
            .collect();
        let summary = calculator.calculate_weekly_load(&sessions);

        // each session: volume 30, intensity 15, total 45
        assert!((summary.total_load - 180.0).abs() < f64::EPSILON);
        assert!((summary.average_daily_load - 180.0 / 7.0).abs() < 1e-9);
        assert!((summary.peak_daily_load - 45.0).abs() < f64::EPSILON);
        assert_eq!(summary.recommendation, WeeklyRecommendation::Low);
        assert!(summary.load_variation > 0.0);
    }

    #[test]
    fn test_weekly_variation_zero_when_empty() {
        let calculator = LoadCalculator::new(ExperienceLevel::Beginner);
        let summary = calculator.calculate_weekly_load(&[]);
        assert!((summary.load_variation - 0.0).abs() < f64::EPSILON);
        assert_eq!(summary.next_day_intensity, NextDayIntensity::High);
    }

    #[test]
    fn test_recovery_debt_tiers() {
        let mk = |debt: f64| ExternalActivity {
            activity_type: "run".to_owned(),
            start_time: Utc.with_ymd_and_hms(2026, 3, 2, 7, 0, 0).unwrap(),
            training_stress_score: 50.0,
            recovery_debt_hours: debt,
        };

        let debt = LoadCalculator::calculate_recovery_debt(&[mk(5.0)]);
        assert_eq!(debt.status, RecoveryStatus::Excellent);

        let debt = LoadCalculator::calculate_recovery_debt(&[mk(30.0), mk(20.0)]);
        assert_eq!(debt.status, RecoveryStatus::Poor);
        assert!(debt.recommendations.iter().any(|r| r.contains("rest day")));
        assert!(debt.recommendations.iter().any(|r| r.contains("run")));
    }

    #[test]
    fn test_overtraining_risk_high() {
        let risk = LoadCalculator::assess_overtraining_risk(450.0, 50.0);
        assert!(risk.score >= 6);
        assert_eq!(risk.level, RiskLevel::High);
    }

    #[test]
    fn test_overtraining_risk_medium_and_low() {
        assert_eq!(
            LoadCalculator::assess_overtraining_risk(350.0, 10.0).level,
            RiskLevel::Low
        );
        assert_eq!(
            LoadCalculator::assess_overtraining_risk(350.0, 30.0).level,
            RiskLevel::Medium
        );
        assert_eq!(
            LoadCalculator::assess_overtraining_risk(100.0, 10.0).level,
            RiskLevel::Low
        );
    }

    #[test]
    fn test_spike_classification_thresholds() {
        assert_eq!(LoadCalculator::detect_load_spike(1.0), SpikeSeverity::None);
        assert_eq!(LoadCalculator::detect_load_spike(1.2), SpikeSeverity::Low);
        assert_eq!(LoadCalculator::detect_load_spike(1.4), SpikeSeverity::Medium);
        assert_eq!(LoadCalculator::detect_load_spike(1.6), SpikeSeverity::High);
    }

    #[test]
    fn test_current_load_status_floors_trailing_average() {
        let today = date(10);
        let session = strength_session(10, 5, 5, 40.0, 8.0);
        let status = LoadCalculator::current_load_status(&[session], &[], today);
        assert!((status.trailing_average - 1.0).abs() < f64::EPSILON);
        assert!((status.load_ratio - RATIO_MAX).abs() < f64::EPSILON);
        assert_eq!(status.spike, SpikeSeverity::High);
    }

    #[test]
    fn test_intensity_recommendations_clamped() {
        let calculator = LoadCalculator::new(ExperienceLevel::Beginner);
        let status = LoadStatus {
            current_load: 900.0,
            trailing_average: 100.0,
            load_ratio: 9.0,
            spike: SpikeSeverity::High,
        };
        let rec = calculator.workout_intensity_recommendations(&status, 900.0);
        assert!(rec.recovery_recommended);
        assert!(rec.intensity >= 0.3 && rec.intensity <= 1.0);
        assert!(rec.volume >= 0.3 && rec.volume <= 1.0);
        // high spike forces 0.5 then absolute penalty x0.8 = 0.4
        assert!((rec.intensity - 0.4).abs() < 1e-9);
        assert!((rec.volume - 0.3).abs() < 1e-9);
    }
}
