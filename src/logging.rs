// ABOUTME: Logging configuration and structured logging setup for the load engine
// ABOUTME: Configures tracing-subscriber with env-filter and compact or JSON output
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Structured logging setup.
//!
//! The engine itself only emits `tracing` events; embedders that want the
//! engine to own subscriber installation can call [`init_logging`] once at
//! startup. Audit records go through [`crate::audit`] on top of this.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Compact,
    /// Full-format output for local debugging
    Full,
    /// JSON lines for log aggregation pipelines
    Json,
}

/// Install a global tracing subscriber.
///
/// `level` is a default directive (for example `"info"` or
/// `"loadguard=debug"`); the `RUST_LOG` environment variable overrides it.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init()?,
        LogFormat::Full => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }

    Ok(())
}
