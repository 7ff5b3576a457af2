//! # Runtime
//!
//! Process-level setup for binaries that talk to the Kubernetes API.
//!
//! - `initialization`: crypto provider, tracing and client bootstrap

pub mod initialization;

pub use initialization::{initialize, install_crypto_provider};
