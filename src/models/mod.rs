// ABOUTME: Core data model for the load management engine
// ABOUTME: Shared enums plus session, activity and adjustment submodules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Data model shared by the calculation, aggregation and guardrail layers.

use serde::{Deserialize, Serialize};

/// Completed and planned training sessions
pub mod session;

/// Imported external activities
pub mod activity;

/// Guardrail adjustments and actions
pub mod adjustment;

pub use activity::ExternalActivity;
pub use adjustment::{AdjustmentType, GuardrailAction, GuardrailAdjustment};
pub use session::{
    BlockType, Exercise, HeartRateSummary, IntervalBlock, Session, SessionModification,
};

/// Discrete effort intensity bands, Z1 easiest to Z5 hardest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntensityZone {
    /// Recovery / easy effort
    #[default]
    Z1,
    /// Aerobic base
    Z2,
    /// Tempo
    Z3,
    /// Threshold
    Z4,
    /// Maximal / anaerobic
    Z5,
}

impl IntensityZone {
    /// Parse a free-form zone label to its canonical zone.
    ///
    /// Matching is case-insensitive and takes the first `z1`..`z5` occurrence
    /// anywhere in the label, so `"z4-threshold"` and `"Zone Z2"` both
    /// normalize. Labels with no such occurrence return `None`.
    #[must_use]
    pub fn normalize(label: &str) -> Option<Self> {
        let bytes = label.as_bytes();
        bytes.windows(2).find_map(|pair| {
            if pair[0].eq_ignore_ascii_case(&b'z') {
                match pair[1] {
                    b'1' => Some(Self::Z1),
                    b'2' => Some(Self::Z2),
                    b'3' => Some(Self::Z3),
                    b'4' => Some(Self::Z4),
                    b'5' => Some(Self::Z5),
                    _ => None,
                }
            } else {
                None
            }
        })
    }

    /// Zone index, 1 through 5
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Z1 => 1,
            Self::Z2 => 2,
            Self::Z3 => 3,
            Self::Z4 => 4,
            Self::Z5 => 5,
        }
    }

    /// Step the zone down by `levels`, saturating at Z1
    #[must_use]
    pub const fn step_down(self, levels: usize) -> Self {
        let target = self.index().saturating_sub(levels);
        match target {
            0 | 1 => Self::Z1,
            2 => Self::Z2,
            3 => Self::Z3,
            4 => Self::Z4,
            _ => Self::Z5,
        }
    }

    /// True for the top two bands (Z4/Z5)
    #[must_use]
    pub const fn is_high_intensity(self) -> bool {
        matches!(self, Self::Z4 | Self::Z5)
    }
}

/// Athlete experience tier used to select guardrail thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    /// First year of structured training
    Beginner,
    /// Consistent training history, still building capacity
    #[default]
    Intermediate,
    /// Multiple years of structured training
    Advanced,
    /// Competitive athlete
    Elite,
}

/// Gender used for heart-rate based load estimation defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male-style max-HR estimate and TRIMP factor
    #[default]
    Male,
    /// Female-style max-HR estimate and TRIMP factor
    Female,
}

/// Endurance modality for MET-based load estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Running / treadmill work
    Running,
    /// Road or indoor cycling
    Cycling,
    /// Pool or open-water swimming
    Swimming,
}
