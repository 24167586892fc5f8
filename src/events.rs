// ABOUTME: Broadcast event bus for guardrail notifications and inbound training events
// ABOUTME: Typed payloads over a tokio broadcast channel; dropped when nobody listens
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Event notification channel.
//!
//! The guardrail monitor announces applied guardrails here and receives
//! session-completed, pain-reported and session-planned notifications that
//! trigger the corresponding checks. Publishing never fails: events with no
//! subscribers are dropped.

use crate::models::AdjustmentType;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Events flowing between the engine and its embedding application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topic", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineEvent {
    /// A guardrail was applied to a user's upcoming training
    GuardrailApplied {
        /// Affected user
        user_id: Uuid,
        /// Kind of adjustment applied
        kind: AdjustmentType,
        /// Fractional reduction that was applied
        reduction: f64,
        /// Number of sessions rewritten
        sessions_affected: usize,
    },
    /// A session finished; triggers a ramp-rate check
    SessionCompleted {
        /// Owner of the session
        user_id: Uuid,
    },
    /// The user reported pain; triggers a pain-flag downshift
    PainReported {
        /// Affected user
        user_id: Uuid,
        /// Pain level on a 1-10 scale
        level: u8,
        /// Body location
        location: String,
    },
    /// A session was planned; triggers validation
    SessionPlanned {
        /// Owner of the session
        user_id: Uuid,
        /// The planned session
        session_id: Uuid,
    },
}

/// Broadcast bus carrying [`EngineEvent`]s
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EngineEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl EventBus {
    /// Create a bus with the given channel capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all current subscribers
    pub fn publish(&self, event: EngineEvent) {
        if let Err(err) = self.sender.send(event) {
            tracing::debug!("event dropped, no subscribers: {err}");
        }
    }

    /// Subscribe to all future events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.sender.subscribe()
    }
}
