// ABOUTME: External activity model for imported workouts such as runs and rides
// ABOUTME: Read-only input to load aggregation and recovery debt calculation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An imported activity not authored inside the app (e.g. a Strava run).
///
/// Treated as read-only input: the engine never mutates or persists these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalActivity {
    /// Activity type label, e.g. `run`, `ride`
    pub activity_type: String,
    /// When the activity started
    pub start_time: DateTime<Utc>,
    /// Training stress score reported by the source
    pub training_stress_score: f64,
    /// Hours of recovery this activity is expected to cost
    pub recovery_debt_hours: f64,
}
