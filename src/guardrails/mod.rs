// ABOUTME: Guardrail subsystem - ramp analysis and the stateful monitor
// ABOUTME: Re-exports the monitor, its outcome types and the pure ramp functions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Load-management guardrails.

/// Pure ramp-rate analysis
pub mod ramp;

/// Stateful guardrail monitor
pub mod monitor;

pub use monitor::{
    apply_hiit_reduction, LoadGuardrails, LoadOverview, MissedDaysOutcome, PainFlagOutcome,
    PlannedSessionVerdict, RampCheck, RejectionReason, TriggerRecord, REASON_RAMP_RATE,
};
pub use ramp::{
    analyze_ramp_rate, calculate_ramp_rate, exceeds_threshold, hiit_reduction, RampAnalysis,
    RampSeverity, WeeklyTotal, MAX_REDUCTION,
};
