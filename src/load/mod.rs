// ABOUTME: Load subsystem - single-session calculation cascade and aggregate calculators
// ABOUTME: Re-exports the engine, calculator and physiological constants
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Training load calculation.

/// Fixed physiological constants
pub mod constants;

/// Single-session load calculation cascade
pub mod engine;

/// Aggregate load, recovery debt and risk calculation
pub mod calculator;

pub use calculator::{
    ComprehensiveLoad, IntensityRecommendation, LoadCalculator, LoadStatus, NextDayIntensity,
    OvertrainingRisk, RecoveryDebt, RecoveryStatus, RiskLevel, SessionLoad, SpikeSeverity,
    WeeklyLoadSummary, WeeklyRecommendation,
};
pub use constants::{met_value, rpe_zone_multiplier, zone_load_weight};
pub use engine::{
    round2, AthleteProfile, LoadCalculationEngine, LoadMethod, LoadResult, SessionValidation,
};
