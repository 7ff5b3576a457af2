//! # Usage Tracking
//!
//! Records which managed resources use which provider configuration, so that
//! configurations still in use are not deleted.

mod tracker;

pub use tracker::{build_usage, ProviderConfigUsageTracker};

use crate::resource::ManagedResource;
use anyhow::Result;
use async_trait::async_trait;

/// Registers that a managed resource depends on its provider configuration
#[async_trait]
pub trait UsageTracker: Send + Sync {
    /// Record the dependency edge from `mg` onto its referenced provider configuration
    async fn track(&self, mg: &dyn ManagedResource) -> Result<()>;
}

/// Adapts a plain function into a `UsageTracker`
pub struct TrackerFn<F>(pub F);

impl<F> std::fmt::Debug for TrackerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> UsageTracker for TrackerFn<F>
where
    F: Fn(&dyn ManagedResource) -> Result<()> + Send + Sync,
{
    async fn track(&self, mg: &dyn ManagedResource) -> Result<()> {
        (self.0)(mg)
    }
}
