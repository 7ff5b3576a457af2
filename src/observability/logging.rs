//! # Logging
//!
//! Tracing subscriber setup for binaries embedding the provider.

use crate::config::{ControllerConfig, LogFormat};
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Build the log filter
///
/// `RUST_LOG` wins when set and valid; otherwise the configured level applies to
/// this crate and everything else logs at WARN.
pub fn build_env_filter(config: &ControllerConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config))
}

fn default_filter(config: &ControllerConfig) -> EnvFilter {
    let level = config.log_level.to_lowercase();
    EnvFilter::try_new(format!("warn,provider_helm={}", level))
        .unwrap_or_else(|_| EnvFilter::new("warn,provider_helm=info"))
}

/// Install the global tracing subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &ControllerConfig) -> Result<()> {
    let filter = build_env_filter(config);
    let result = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_ansi(config.log_enable_color)
            .with_env_filter(filter)
            .try_init(),
    };

    result
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install tracing subscriber")
}
