//! # Custom Resource Definitions
//!
//! CRD types for the Helm provider's configuration objects.
//!
//! ## Module Structure
//!
//! - `credentials.rs` - Credential descriptors and identities
//! - `reference.rs` - References from managed resources and usages
//! - `provider_config.rs` - `ProviderConfig` and `ClusterProviderConfig`
//! - `usage.rs` - `ProviderConfigUsage`
//! - `generate.rs` - CRD YAML rendering used by `crdgen`

mod credentials;
mod generate;
mod provider_config;
mod reference;
mod usage;

// Re-export all public types
pub use credentials::{
    CredentialsSource, EnvSelector, FsSelector, Identity, IdentityType, ProviderCredentials,
    SecretKeySelector,
};
pub use generate::crd_yaml;
pub use provider_config::{
    ClusterProviderConfig, ClusterProviderConfigSpec, ProviderConfig, ProviderConfigKind,
    ProviderConfigObject, ProviderConfigSpec, ProviderConfigStatus, UnknownProviderConfigKind,
};
pub use reference::{ProviderConfigReference, TypedReference};
pub use usage::{ProviderConfigUsage, ProviderConfigUsageSpec};
