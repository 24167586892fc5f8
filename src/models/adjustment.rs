// ABOUTME: Guardrail adjustment model - time-bounded training reductions and the actions that create them
// ABOUTME: Adjustments are persisted, consulted by session validation, and age out by end date
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of protective adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    /// Reduce intensity of upcoming high-intensity sessions
    ReduceHiit,
    /// Ease back in after missed training days
    GradualReturn,
    /// Immediate intensity reduction after a pain report
    ImmediateDownshift,
    /// Additional scheduled recovery days
    ExtendRecovery,
    /// A planned reduced-load week
    DeloadWeek,
}

/// A time-bounded behavioral constraint on future training.
///
/// Lifecycle: created by the guardrail monitor when a threshold is exceeded,
/// persisted to the adjustment store, consulted by session validation, and
/// never explicitly deleted - an adjustment with an `end_date` in the past is
/// simply no longer active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailAdjustment {
    /// Stable adjustment identifier
    pub id: Uuid,
    /// Kind of constraint
    pub kind: AdjustmentType,
    /// Fractional reduction in [0,1], capped at 0.5
    pub reduction: f64,
    /// First day the adjustment applies
    pub start_date: NaiveDate,
    /// Last day the adjustment applies; `None` means open-ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Body location for pain-triggered adjustments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_location: Option<String>,
    /// Plain-language reason, suitable for direct display
    pub reason: String,
    /// When the adjustment was created
    pub created_at: DateTime<Utc>,
}

impl GuardrailAdjustment {
    /// Create an adjustment starting today and lasting `duration_days` days
    #[must_use]
    pub fn new(
        kind: AdjustmentType,
        reduction: f64,
        start_date: NaiveDate,
        duration_days: Option<i64>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            reduction: reduction.clamp(0.0, 0.5),
            start_date,
            end_date: duration_days.map(|d| start_date + chrono::Duration::days(d)),
            pain_location: None,
            reason: reason.into(),
            created_at: Utc::now(),
        }
    }

    /// True while the adjustment has not aged out as of `today`
    #[must_use]
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.end_date.is_none_or(|end| today <= end)
    }

    /// True when `date` falls inside the adjustment window
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }
}

/// An action decided by the guardrail monitor.
///
/// Actions are dispatched by `apply_session_modifications`: `ReduceHiit`
/// rewrites upcoming high-intensity sessions, the rest persist a new
/// [`GuardrailAdjustment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GuardrailAction {
    /// Reduce upcoming high-intensity sessions by `reduction`
    ReduceHiit {
        /// Fractional intensity reduction, capped at 0.5
        reduction: f64,
    },
    /// Schedule additional recovery days
    ExtendRecovery {
        /// Number of extra recovery days
        days: i64,
    },
    /// Impose a reduced-load week
    DeloadWeek {
        /// Fractional load reduction for the week
        reduction: f64,
    },
    /// Ease back in after a training gap
    GradualReturn {
        /// Fractional reduction during the return window
        reduction: f64,
        /// Length of the return window in days
        days: i64,
    },
    /// Immediate downshift after a pain report
    ImmediateDownshift {
        /// Fractional reduction during the downshift window
        reduction: f64,
        /// Length of the downshift window in days
        days: i64,
        /// Reported pain location
        pain_location: String,
    },
}

impl GuardrailAction {
    /// The fractional reduction this action carries, if any
    #[must_use]
    pub const fn reduction(&self) -> Option<f64> {
        match self {
            Self::ReduceHiit { reduction }
            | Self::DeloadWeek { reduction }
            | Self::GradualReturn { reduction, .. }
            | Self::ImmediateDownshift { reduction, .. } => Some(*reduction),
            Self::ExtendRecovery { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_adjustment_ages_out() {
        let adj = GuardrailAdjustment::new(
            AdjustmentType::GradualReturn,
            0.3,
            date(2026, 3, 1),
            Some(5),
            "test",
        );
        assert!(adj.is_active(date(2026, 3, 6)));
        assert!(!adj.is_active(date(2026, 3, 7)));
    }

    #[test]
    fn test_open_ended_adjustment_never_expires() {
        let adj = GuardrailAdjustment::new(
            AdjustmentType::ReduceHiit,
            0.2,
            date(2026, 3, 1),
            None,
            "test",
        );
        assert!(adj.is_active(date(2030, 1, 1)));
    }

    #[test]
    fn test_reduction_capped_at_half() {
        let adj = GuardrailAdjustment::new(
            AdjustmentType::ImmediateDownshift,
            0.9,
            date(2026, 3, 1),
            Some(14),
            "test",
        );
        assert!((adj.reduction - 0.5).abs() < f64::EPSILON);
    }
}
