// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # evomind-observability
//!
//! Unified logging initialization for evomind.
//!
//! Every crate in the workspace emits through `tracing`; this crate owns
//! the one place a process installs a subscriber. Numeric warnings from the
//! execution engine and mutation no-op warnings from the genome crate all
//! surface through the filter configured here.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the tracing filter, taking precedence
/// over the configured level.
pub const LOG_ENV_VAR: &str = "EVOMIND_LOG";

/// Build the filter string: `EVOMIND_LOG` wins, otherwise the configured
/// level applies to the whole process.
pub fn filter_directive(configured_level: &str) -> String {
    std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| configured_level.to_string())
}

/// Initialize console logging.
///
/// `configured_level` usually comes from the `[logging]` configuration
/// section. Fails if a global subscriber is already installed — call this
/// once, from the process entry point.
pub fn init_logging(configured_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter_directive(configured_level))
        .with_context(|| format!("invalid log filter for level '{}'", configured_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {}", err))?;
    Ok(())
}
