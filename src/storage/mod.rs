// ABOUTME: Storage abstraction for sessions and guardrail adjustments
// ABOUTME: Async traits keyed by user id; the persistence substrate is an external collaborator
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Store abstractions.
//!
//! The engine owns no persistence substrate. Embedders implement these
//! traits over their key-value or relational backend; [`memory::MemoryStore`]
//! serves tests and backend-less embedders.

use crate::models::{ExternalActivity, GuardrailAdjustment, Session};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// In-memory store implementation
pub mod memory;

pub use memory::MemoryStore;

/// Session and activity reads plus session writes
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// All recorded sessions for a user, any order
    async fn user_sessions(&self, user_id: Uuid) -> Result<Vec<Session>>;

    /// Planned sessions from `from` (inclusive) through the next `days` days
    async fn upcoming_sessions(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        days: i64,
    ) -> Result<Vec<Session>>;

    /// Imported external activities for a user
    async fn external_activities(&self, user_id: Uuid) -> Result<Vec<ExternalActivity>>;

    /// Persist a session, replacing any existing session with the same id
    async fn save_session(&self, user_id: Uuid, session: &Session) -> Result<()>;
}

/// Guardrail adjustment reads and writes
#[async_trait]
pub trait AdjustmentStore: Send + Sync {
    /// Adjustments still active as of `today` (already time-filtered)
    async fn active_adjustments(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<GuardrailAdjustment>>;

    /// Persist a new adjustment; adjustments are never deleted, they age out
    async fn save_adjustment(&self, user_id: Uuid, adjustment: &GuardrailAdjustment)
        -> Result<()>;
}
