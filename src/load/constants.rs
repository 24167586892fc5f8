// ABOUTME: Physiological constants used by the load calculation cascade and aggregation
// ABOUTME: Fixed method confidences, zone weights, TRIMP factors, MET values and risk thresholds
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Physiological constants based on sports science conventions.
//!
//! These values are fixed by design: method confidence reflects how
//! physiologically precise the method is, not the quality of a particular
//! data sample beyond presence and validity.

use crate::models::{IntensityZone, Modality};

/// Banister TRIMP parameters
pub mod trimp {
    /// Fixed confidence for heart-rate based load
    pub const CONFIDENCE: f64 = 0.95;

    /// Gender weighting factor, male-style (default)
    pub const MALE_GENDER_FACTOR: f64 = 1.92;

    /// Gender weighting factor, female-style
    pub const FEMALE_GENDER_FACTOR: f64 = 1.67;

    /// Default resting heart rate when none is recorded, bpm
    pub const DEFAULT_REST_HR: f64 = 60.0;

    /// Default athlete age for max-HR estimation
    pub const DEFAULT_AGE: u32 = 35;
}

/// Zone-distribution load parameters
pub mod zones {
    /// Fixed confidence for zone-distribution based load
    pub const CONFIDENCE: f64 = 0.85;

    /// Load weight per minute for zones Z1..Z5
    pub const LOAD_WEIGHTS: [f64; 5] = [1.0, 2.0, 4.0, 7.0, 10.0];

    /// Zone multipliers applied on top of RPE-based load for zones Z1..Z5
    pub const RPE_MULTIPLIERS: [f64; 5] = [0.5, 1.0, 1.5, 2.0, 2.5];
}

/// RPE-based load parameters
pub mod rpe {
    /// Fixed confidence for RPE x duration load
    pub const CONFIDENCE: f64 = 0.75;

    /// Lowest meaningful RPE; non-positive values are treated as this
    pub const MIN: f64 = 1.0;

    /// Highest RPE on the Borg CR10-style scale
    pub const MAX: f64 = 10.0;

    /// RPE at or above which a session counts as high intensity
    pub const HIGH_INTENSITY: f64 = 8.0;
}

/// MET-minutes load parameters
pub mod met {
    /// Fixed confidence for MET-based load, the least precise method
    pub const CONFIDENCE: f64 = 0.65;

    /// Scale factor applied to MET-minutes to align with the other methods
    pub const LOAD_ADJUSTMENT: f64 = 0.8;
}

/// Session validation bounds
pub mod validation {
    /// Lowest plausible average heart rate, bpm
    pub const MIN_AVG_HR: f64 = 30.0;

    /// Highest plausible average heart rate, bpm
    pub const MAX_AVG_HR: f64 = 220.0;

    /// Allowed mismatch between zone minutes and total duration, minutes
    pub const ZONE_MINUTES_TOLERANCE: f64 = 5.0;
}

/// Overtraining risk scoring thresholds
pub mod risk {
    /// Combined load above which three risk points accrue
    pub const LOAD_HIGH: f64 = 400.0;

    /// Combined load above which two risk points accrue
    pub const LOAD_ELEVATED: f64 = 300.0;

    /// Recovery debt hours above which three risk points accrue
    pub const DEBT_HIGH: f64 = 48.0;

    /// Recovery debt hours above which two risk points accrue
    pub const DEBT_ELEVATED: f64 = 24.0;

    /// Score at which risk is classified high
    pub const SCORE_HIGH: u32 = 5;

    /// Score at which risk is classified medium
    pub const SCORE_MEDIUM: u32 = 3;
}

/// Recovery debt status thresholds, hours
pub mod recovery {
    /// Below this total debt recovery status is excellent
    pub const EXCELLENT_BELOW: f64 = 12.0;

    /// Below this total debt recovery status is good
    pub const GOOD_BELOW: f64 = 24.0;

    /// Below this total debt recovery status is moderate; at or above, poor
    pub const MODERATE_BELOW: f64 = 48.0;

    /// Total debt above which a rest day is recommended
    pub const REST_DAY_ABOVE: f64 = 24.0;

    /// Per-type debt above which type-specific advice is emitted
    pub const TYPE_ADVICE_ABOVE: f64 = 12.0;
}

/// Load spike classification thresholds on the clamped current/trailing ratio
pub mod spike {
    /// Ratio above which a low spike is flagged
    pub const LOW: f64 = 1.1;

    /// Ratio above which a medium spike is flagged
    pub const MEDIUM: f64 = 1.3;

    /// Ratio above which a high spike is flagged
    pub const HIGH: f64 = 1.5;
}

/// Load weight per minute for a canonical zone
#[must_use]
pub fn zone_load_weight(zone: IntensityZone) -> f64 {
    zones::LOAD_WEIGHTS[zone.index() - 1]
}

/// Zone multiplier applied on top of RPE-based load
#[must_use]
pub fn rpe_zone_multiplier(zone: IntensityZone) -> f64 {
    zones::RPE_MULTIPLIERS[zone.index() - 1]
}

/// MET value for a modality at a given intensity zone.
///
/// Values follow the Compendium of Physical Activities ranges for each
/// modality, bucketed to the five effort bands.
#[must_use]
pub fn met_value(modality: Modality, zone: IntensityZone) -> f64 {
    const RUNNING: [f64; 5] = [6.0, 8.3, 9.8, 11.5, 14.5];
    const CYCLING: [f64; 5] = [4.0, 6.8, 8.0, 10.0, 12.0];
    const SWIMMING: [f64; 5] = [5.8, 7.0, 8.3, 9.8, 11.0];

    let table = match modality {
        Modality::Running => RUNNING,
        Modality::Cycling => CYCLING,
        Modality::Swimming => SWIMMING,
    };
    table[zone.index() - 1]
}
