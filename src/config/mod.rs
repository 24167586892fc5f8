// ABOUTME: Engine configuration - per-tier guardrail thresholds and weekly load targets
// ABOUTME: Serde-deserializable with field defaults so partial configs stay valid
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Configuration for the guardrail monitor and load calculator.
//!
//! Every field has a default so embedders can deserialize a partial config
//! (or none at all) and still get the fixed threshold tables.

use crate::models::ExperienceLevel;
use serde::{Deserialize, Serialize};

/// Per-experience-level guardrail thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GuardrailThresholds {
    /// Largest safe week-over-week fractional load increase
    pub max_weekly_increase: f64,
    /// Baseline HIIT reduction applied when the ramp limit is exceeded
    pub hiit_reduction: f64,
    /// Maximum consecutive training days before a session is rejected
    pub consecutive_days_limit: u32,
    /// Minimum rest days per week
    pub min_rest_days: u32,
}

impl GuardrailThresholds {
    /// Fixed threshold table by experience tier
    #[must_use]
    pub const fn for_level(level: ExperienceLevel) -> Self {
        match level {
            ExperienceLevel::Beginner => Self {
                max_weekly_increase: 0.08,
                hiit_reduction: 0.25,
                consecutive_days_limit: 3,
                min_rest_days: 2,
            },
            ExperienceLevel::Intermediate => Self {
                max_weekly_increase: 0.10,
                hiit_reduction: 0.20,
                consecutive_days_limit: 4,
                min_rest_days: 1,
            },
            ExperienceLevel::Advanced => Self {
                max_weekly_increase: 0.12,
                hiit_reduction: 0.15,
                consecutive_days_limit: 5,
                min_rest_days: 1,
            },
            ExperienceLevel::Elite => Self {
                max_weekly_increase: 0.15,
                hiit_reduction: 0.10,
                consecutive_days_limit: 6,
                min_rest_days: 1,
            },
        }
    }
}

/// Weekly load target for an experience tier, the anchor for the
/// low/optimal/high weekly recommendation window
#[must_use]
pub const fn weekly_load_target(level: ExperienceLevel) -> f64 {
    match level {
        ExperienceLevel::Beginner => 200.0,
        ExperienceLevel::Intermediate => 300.0,
        ExperienceLevel::Advanced => 400.0,
        ExperienceLevel::Elite => 500.0,
    }
}

fn default_level() -> ExperienceLevel {
    ExperienceLevel::Intermediate
}

fn default_hiit_window() -> usize {
    2
}

fn default_upcoming_days() -> i64 {
    14
}

fn default_history_cap() -> usize {
    30
}

fn default_weekly_history_weeks() -> usize {
    8
}

/// Configuration for one user's guardrail monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailConfig {
    /// Experience tier, selects the threshold table and weekly target
    #[serde(default = "default_level")]
    pub experience_level: ExperienceLevel,
    /// How many upcoming high-intensity sessions a HIIT reduction touches
    #[serde(default = "default_hiit_window")]
    pub hiit_sessions_window: usize,
    /// How many days ahead to look for upcoming sessions
    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: i64,
    /// Per-user cap on the in-memory trigger history
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,
    /// How many trailing weeks to bucket for ramp analysis
    #[serde(default = "default_weekly_history_weeks")]
    pub weekly_history_weeks: usize,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            experience_level: default_level(),
            hiit_sessions_window: default_hiit_window(),
            upcoming_days: default_upcoming_days(),
            history_cap: default_history_cap(),
            weekly_history_weeks: default_weekly_history_weeks(),
        }
    }
}

impl GuardrailConfig {
    /// Threshold table for the configured tier
    #[must_use]
    pub const fn thresholds(&self) -> GuardrailThresholds {
        GuardrailThresholds::for_level(self.experience_level)
    }
}
