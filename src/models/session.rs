// ABOUTME: Session data model including exercises, interval structure and applied modifications
// ABOUTME: Sessions carry optional telemetry consumed by the load calculation cascade
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

use super::{ExternalActivity, IntensityZone, Modality};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// One strength or conditioning exercise within a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Number of sets (non-negative)
    pub sets: u32,
    /// Repetitions per set (non-negative)
    pub reps: u32,
    /// Working weight in kilograms (non-negative)
    pub weight: f64,
    /// Perceived exertion for this exercise, clamped to [1,10] when consumed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<f64>,
    /// Intensity zone for conditioning work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity_zone: Option<IntensityZone>,
}

/// Kind of block inside a structured session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Preparatory work
    Warmup,
    /// The main body of the session
    Main,
    /// Repeated work/rest intervals
    Interval,
    /// Wind-down work
    Cooldown,
}

/// One block of a structured session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalBlock {
    /// What role this block plays in the session
    pub block_type: BlockType,
    /// Target intensity zone for the block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<IntensityZone>,
    /// Continuous duration in minutes, for steady blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// Number of repeats, for interval blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// Work duration per repeat in minutes, for interval blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_duration_minutes: Option<f64>,
    /// Free-form block description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Append-only record of a guardrail edit applied to a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionModification {
    /// Kind of edit, e.g. `intensity_reduction`
    pub kind: String,
    /// Fractional reduction that was applied
    pub reduction: f64,
    /// Why the edit was applied, e.g. `guardrail_ramp_rate`
    pub reason: String,
    /// When the edit was applied
    pub applied_at: DateTime<Utc>,
}

/// Average heart-rate summary recorded for a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeartRateSummary {
    /// Average heart rate over the session, bpm
    pub avg_hr: f64,
    /// Measured maximum heart rate, bpm; estimated from age/gender when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hr: Option<f64>,
    /// Resting heart rate, bpm; defaults to 60 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_hr: Option<f64>,
}

/// A completed or planned training session.
///
/// Created by session planning, read by the load calculator for aggregation,
/// and rewritten (as a new value) by the guardrail monitor when a reduction
/// is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Stable session identifier
    pub id: Uuid,
    /// Owner of the session
    pub user_id: Uuid,
    /// Calendar date of the session
    pub date: NaiveDate,
    /// Ordered exercise list
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Free-form tags, e.g. `HIIT`
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Optional structured interval blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<Vec<IntervalBlock>>,
    /// Append-only list of applied guardrail edits
    #[serde(default)]
    pub modifications: Vec<SessionModification>,
    /// Total session duration in minutes, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// Heart-rate telemetry, when recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<HeartRateSummary>,
    /// Minutes spent per zone label, when a zone breakdown exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_distribution: Option<BTreeMap<String, f64>>,
    /// Session-level perceived exertion, clamped to [1,10] when consumed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<f64>,
    /// Primary intensity zone of the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity_zone: Option<IntensityZone>,
    /// Endurance modality, for MET-based estimation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modality: Option<Modality>,
    /// Planned intensity as a fraction of max effort, for interval sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_intensity: Option<f64>,
    /// Imported activities attributed to this session
    #[serde(default)]
    pub external_activities: Vec<ExternalActivity>,
}

impl Session {
    /// Create an empty session for the given user and date
    #[must_use]
    pub fn new(user_id: Uuid, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            exercises: Vec::new(),
            tags: BTreeSet::new(),
            structure: None,
            modifications: Vec::new(),
            duration_minutes: None,
            heart_rate: None,
            zone_distribution: None,
            rpe: None,
            intensity_zone: None,
            modality: None,
            target_intensity: None,
            external_activities: Vec::new(),
        }
    }

    /// Planned intensity as a fraction of max effort.
    ///
    /// Falls back from the explicit target to RPE/10, then to the primary
    /// zone (index/5), then to a moderate 0.7 default.
    #[must_use]
    pub fn planned_intensity(&self) -> f64 {
        if let Some(target) = self.target_intensity {
            return target.clamp(0.0, 1.0);
        }
        if let Some(rpe) = self.rpe {
            return (rpe.clamp(1.0, 10.0) / 10.0).clamp(0.0, 1.0);
        }
        if let Some(zone) = self.intensity_zone {
            return zone.index() as f64 / 5.0;
        }
        0.7
    }

    /// True if a guardrail modification with the given reason is already recorded
    #[must_use]
    pub fn has_modification(&self, reason: &str) -> bool {
        self.modifications.iter().any(|m| m.reason == reason)
    }
}
