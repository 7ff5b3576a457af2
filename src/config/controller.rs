//! # Controller Configuration
//!
//! Controller-level settings loaded from environment variables.

use crate::constants::{DEFAULT_FIELD_MANAGER, DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    /// Parse a format name, falling back to JSON for anything unrecognised
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        if value.eq_ignore_ascii_case("text") {
            LogFormat::Text
        } else {
            LogFormat::Json
        }
    }
}

/// Controller-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
/// Environment variables are populated from a ConfigMap using `envFrom` in the deployment.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Field manager used when applying ProviderConfigUsage objects
    pub field_manager: String,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    /// Used when RUST_LOG is not set
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: LogFormat,
    /// Enable color in text format logs
    pub log_enable_color: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::parse_or_default(DEFAULT_LOG_FORMAT),
            log_enable_color: false,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// `from_env` is this function over the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            field_manager: lookup("FIELD_MANAGER")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FIELD_MANAGER.to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format: LogFormat::parse_or_default(
                &lookup("LOG_FORMAT").unwrap_or_else(|| DEFAULT_LOG_FORMAT.to_string()),
            ),
            log_enable_color: lookup("LOG_ENABLE_COLOR").map_or(false, |v| parse_bool(&v)),
        }
    }
}

/// Interpret an environment value as a boolean
fn parse_bool(value: &str) -> bool {
    let v_lower = value.to_lowercase();
    v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
}
