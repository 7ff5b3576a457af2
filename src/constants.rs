//! # Constants
//!
//! Shared constants used throughout the provider.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Kind of the namespaced provider configuration
pub const PROVIDER_CONFIG_KIND: &str = "ProviderConfig";

/// Kind of the cluster-scoped provider configuration
pub const CLUSTER_PROVIDER_CONFIG_KIND: &str = "ClusterProviderConfig";

/// Label placed on every ProviderConfigUsage, valued with the provider config name
/// Lets callers list the usages of a given provider config
pub const PROVIDER_CONFIG_LABEL: &str = "crossplane.io/provider-config";

/// Default field manager for server-side apply of ProviderConfigUsage objects
pub const DEFAULT_FIELD_MANAGER: &str = "provider-helm";

/// Default global log level
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Default log format (json, text)
pub const DEFAULT_LOG_FORMAT: &str = "json";
