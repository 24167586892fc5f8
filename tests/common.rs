// ABOUTME: Shared fixtures for integration tests - monitor wiring and session builders
// ABOUTME: Every test gets its own store, bus and audit sink; users never share state
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, Utc};
use loadguard::audit::MemoryAuditSink;
use loadguard::config::GuardrailConfig;
use loadguard::events::EventBus;
use loadguard::guardrails::LoadGuardrails;
use loadguard::models::{Exercise, Session};
use loadguard::storage::MemoryStore;
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

/// Fully wired monitor with handles to its collaborators
pub struct Harness {
    pub monitor: LoadGuardrails,
    pub store: Arc<MemoryStore>,
    pub audit: Arc<MemoryAuditSink>,
    pub events: EventBus,
}

/// Build a monitor backed by an in-memory store and audit sink
pub fn harness(config: GuardrailConfig) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let audit = Arc::new(MemoryAuditSink::new());
    let events = EventBus::default();
    let monitor = LoadGuardrails::new(
        store.clone(),
        store.clone(),
        events.clone(),
        audit.clone(),
        config,
    );
    Harness {
        monitor,
        store,
        audit,
        events,
    }
}

pub fn harness_default() -> Harness {
    harness(GuardrailConfig::default())
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn days_ago(days: i64) -> NaiveDate {
    today() - Duration::days(days)
}

pub fn days_ahead(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

/// Strength session whose total load equals `load` exactly (pure volume,
/// no RPE so the intensity component stays zero)
pub fn strength_session(user_id: Uuid, date: NaiveDate, load: f64) -> Session {
    let mut session = Session::new(user_id, date);
    session.exercises.push(Exercise {
        name: "deadlift".to_owned(),
        sets: 1,
        reps: 1,
        weight: load,
        rpe: None,
        intensity_zone: None,
    });
    session
}

/// Upcoming HIIT-tagged interval session with an explicit target intensity
pub fn hiit_session(user_id: Uuid, date: NaiveDate, target_intensity: f64) -> Session {
    let mut session = Session::new(user_id, date);
    session.tags = BTreeSet::from(["hiit".to_owned()]);
    session.target_intensity = Some(target_intensity);
    session
}
