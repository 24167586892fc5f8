// ABOUTME: Training load management engine - load calculation, aggregation and safety guardrails
// ABOUTME: Crate root wiring the models, calculators, stores and the guardrail monitor together
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Training load management for personal-training applications.
//!
//! Three layers build on each other:
//!
//! - [`load::LoadCalculationEngine`] turns one session's telemetry into a
//!   load number through a fixed priority cascade (TRIMP, then zone
//!   distribution, then RPE x duration, then MET minutes), each method
//!   tagged with a confidence level.
//! - [`load::LoadCalculator`] aggregates sessions and imported activities
//!   into weekly summaries, recovery debt, overtraining risk and bounded
//!   intensity recommendations for one experience tier.
//! - [`guardrails::LoadGuardrails`] watches the trend: it checks weekly
//!   ramp rates against per-tier limits, reacts to missed days and pain
//!   reports, validates planned sessions against active adjustments, and
//!   rewrites upcoming high-intensity sessions when a limit is breached.
//!
//! Storage is abstracted behind [`storage::SessionStore`] and
//! [`storage::AdjustmentStore`]; [`storage::MemoryStore`] implements both
//! for tests and backend-less embedders. Guardrail triggers publish
//! [`events::EngineEvent`]s and produce [`audit::AuditRecord`]s.
//!
//! ```no_run
//! use loadguard::audit::TracingAuditSink;
//! use loadguard::config::GuardrailConfig;
//! use loadguard::events::EventBus;
//! use loadguard::guardrails::LoadGuardrails;
//! use loadguard::storage::MemoryStore;
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! # async fn demo() {
//! let store = Arc::new(MemoryStore::new());
//! let monitor = LoadGuardrails::new(
//!     store.clone(),
//!     store,
//!     EventBus::default(),
//!     Arc::new(TracingAuditSink),
//!     GuardrailConfig::default(),
//! );
//! let check = monitor.check_weekly_ramp_rate(Uuid::new_v4()).await;
//! println!("{}", serde_json::to_string(&check).unwrap());
//! # }
//! ```

pub mod audit;
pub mod config;
pub mod errors;
pub mod events;
pub mod guardrails;
pub mod load;
pub mod logging;
pub mod models;
pub mod storage;

pub use errors::{EngineError, EngineResult};
pub use guardrails::LoadGuardrails;
pub use load::{LoadCalculationEngine, LoadCalculator};
