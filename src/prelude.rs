//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ## Usage
//!
//! ```rust
//! use provider_helm::prelude::*;
//! ```
//!
//! This brings into scope:
//! - All CRD types (ProviderConfig, ClusterProviderConfig, ProviderConfigUsage, etc.)
//! - The resolver and its error type
//! - Client and tracker traits
//! - Controller configuration

// CRD types - most commonly used
pub use crate::crd::*;

// Resolution
pub use crate::clients::{
    extract_credentials, resolve_provider_config, CredentialsError, ObjectReader,
    ResolveError, SecretReader,
};

// Managed resource seam
pub use crate::resource::{ManagedResource, ObjectKey};

// Usage tracking
pub use crate::usage::{ProviderConfigUsageTracker, TrackerFn, UsageTracker};

// Process setup
pub use crate::runtime::{initialize, install_crypto_provider};

// Config types
pub use crate::config::{ControllerConfig, LogFormat};
