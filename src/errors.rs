// ABOUTME: Unified error handling for the load management engine
// ABOUTME: Defines the error taxonomy shared by the calculation, aggregation and guardrail layers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

use thiserror::Error;

/// Result alias used throughout the crate
pub type EngineResult<T> = Result<T, EngineError>;

/// Error taxonomy for the load engine.
///
/// Pure computational failures (`InvalidInput`, `InsufficientData`) surface
/// immediately to the caller: no load score could be produced and the caller
/// must know. Storage and serialization failures are wrapped so the stateful
/// layers can absorb them into structured outcomes instead of propagating.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required numeric field was missing, non-finite, or out of range
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No method in the load calculation cascade was satisfiable
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Failure in an external store collaborator
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),

    /// Failure serializing or deserializing engine data
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// Convenience constructor for invalid-input failures
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Convenience constructor for insufficient-data failures
    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::InsufficientData(message.into())
    }
}
