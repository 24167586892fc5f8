// ABOUTME: Structured audit records for every guardrail trigger
// ABOUTME: Sink trait with a tracing-backed default and an in-memory sink for tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Audit trail.
//!
//! Every guardrail trigger produces a structured record carrying the user,
//! the trigger type and the computed values. Audit is for downstream
//! compliance and debugging, never for control flow: a sink must not fail
//! the triggering operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

/// What caused an audit record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditTrigger {
    /// A ramp-rate guardrail fired
    GuardrailTriggered,
    /// A missed-days downshift was applied
    MissedDaysAdjustment,
    /// A pain flag produced a downshift
    PainFlagResponse,
}

/// One structured audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When the trigger fired
    pub timestamp: DateTime<Utc>,
    /// Affected user
    pub user_id: Uuid,
    /// Trigger type
    pub trigger: AuditTrigger,
    /// Computed values for the trigger (ramp rate, reductions, and so on)
    pub details: serde_json::Value,
}

impl AuditRecord {
    /// Build a record stamped with the current time
    #[must_use]
    pub fn new(user_id: Uuid, trigger: AuditTrigger, details: serde_json::Value) -> Self {
        Self {
            timestamp: Utc::now(),
            user_id,
            trigger,
            details,
        }
    }
}

/// Destination for audit records
pub trait AuditSink: Send + Sync {
    /// Record one audit entry; must not fail the caller
    fn record(&self, record: AuditRecord);
}

/// Default sink: structured tracing events under the `audit` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: AuditRecord) {
        tracing::info!(
            target: "audit",
            user_id = %record.user_id,
            trigger = ?record.trigger,
            details = %record.details,
            "guardrail audit"
        );
    }
}

/// Test sink collecting records in memory
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far
    #[must_use]
    pub fn snapshot(&self) -> Vec<AuditRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: AuditRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}
