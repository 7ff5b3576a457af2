//! # Provider Config Resolution
//!
//! Resolves the provider configuration referenced by a managed resource and
//! registers the resource as one of its users.

use crate::clients::ObjectReader;
use crate::crd::{
    ClusterProviderConfig, ProviderConfig, ProviderConfigKind, ProviderConfigObject,
    ProviderConfigSpec, UnknownProviderConfigKind,
};
use crate::resource::{ManagedResource, ObjectKey};
use crate::usage::UsageTracker;
use thiserror::Error;

/// Why a provider configuration could not be resolved
///
/// All variants are terminal; the caller decides whether to requeue.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The managed resource carries no provider config reference
    #[error("provider config is not set")]
    ConfigNotSet,
    /// The reference names a kind that is not a provider configuration
    #[error("referenced provider config kind {0:?} is invalid")]
    InvalidConfigKind(String),
    /// Reading the provider configuration failed
    #[error("cannot get provider config: {0}")]
    GetConfigFailed(#[source] anyhow::Error),
    /// Registering the usage failed; the fetched configuration is discarded
    #[error("cannot track provider config usage: {0}")]
    TrackUsageFailed(#[source] anyhow::Error),
}

/// Resolve the provider configuration of `mg`
///
/// Fetches the referenced `ProviderConfig` (from the managed resource's namespace)
/// or `ClusterProviderConfig`, then tracks the usage. A `ProviderConfig` referenced
/// from a managed resource without a namespace is never read. Tracking runs once for every
/// successful fetch. Nothing is cached or retried, so each call sees the current
/// reference.
pub async fn resolve_provider_config<C, T>(
    client: &C,
    mg: &dyn ManagedResource,
    tracker: &T,
) -> Result<ProviderConfigSpec, ResolveError>
where
    C: ObjectReader,
    T: UsageTracker + ?Sized,
{
    let reference = mg
        .provider_config_reference()
        .ok_or(ResolveError::ConfigNotSet)?;

    let kind: ProviderConfigKind = reference
        .kind
        .parse()
        .map_err(|UnknownProviderConfigKind(kind)| ResolveError::InvalidConfigKind(kind))?;

    let spec = match kind {
        ProviderConfigKind::ProviderConfig => {
            // A namespaced config is only ever looked up next to the managed resource
            let namespace = mg.object_meta().namespace.as_deref().ok_or_else(|| {
                ResolveError::GetConfigFailed(anyhow::anyhow!(
                    "{} {:?} is namespaced but the managed resource has no namespace",
                    kind,
                    reference.name
                ))
            })?;
            let key = ObjectKey::namespaced(reference.name.as_str(), namespace);
            fetch::<ProviderConfig, C>(client, &key).await?
        }
        ProviderConfigKind::ClusterProviderConfig => {
            let key = ObjectKey::cluster(reference.name.as_str());
            fetch::<ClusterProviderConfig, C>(client, &key).await?
        }
    };

    tracker
        .track(mg)
        .await
        .map_err(ResolveError::TrackUsageFailed)?;

    Ok(spec)
}

async fn fetch<K, C>(client: &C, key: &ObjectKey) -> Result<ProviderConfigSpec, ResolveError>
where
    K: ProviderConfigObject,
    C: ObjectReader,
{
    client
        .get::<K>(key)
        .await
        .map(|pc| pc.provider_config_spec())
        .map_err(ResolveError::GetConfigFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ResolveError::ConfigNotSet.to_string(),
            "provider config is not set"
        );
        assert_eq!(
            ResolveError::InvalidConfigKind("Release".to_string()).to_string(),
            "referenced provider config kind \"Release\" is invalid"
        );
        assert_eq!(
            ResolveError::GetConfigFailed(anyhow::anyhow!("boom")).to_string(),
            "cannot get provider config: boom"
        );
        assert_eq!(
            ResolveError::TrackUsageFailed(anyhow::anyhow!("tracking boom")).to_string(),
            "cannot track provider config usage: tracking boom"
        );
    }

    #[test]
    fn test_wrapped_errors_expose_source() {
        let err = ResolveError::GetConfigFailed(anyhow::anyhow!("boom"));
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("boom"));
        assert!(ResolveError::ConfigNotSet.source().is_none());
    }
}
