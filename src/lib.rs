//! Provider Helm Library
//!
//! Resolves the provider configuration a Helm managed resource uses and records
//! that the resource depends on it.
//!
//! ## Quick Start
//!
//! ```rust
//! use provider_helm::prelude::*;
//! ```
//!
//! This brings commonly used types and traits into scope. For more specific imports,
//! use the individual modules.

pub mod clients;
pub mod config;
pub mod constants;
pub mod crd;
#[cfg(any(test, feature = "fake"))]
pub mod fake;
pub mod observability;
pub mod prelude;
pub mod resource;
pub mod runtime;
pub mod usage;
