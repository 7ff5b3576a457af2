//! # ProviderConfigUsage Tracker
//!
//! Tracks usage by server-side applying a `ProviderConfigUsage` per managed resource.

use crate::config::ControllerConfig;
use crate::constants::PROVIDER_CONFIG_LABEL;
use crate::crd::{ProviderConfigUsage, ProviderConfigUsageSpec, TypedReference};
use crate::resource::ManagedResource;
use crate::usage::UsageTracker;
use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::api::{Api, Patch, PatchParams};
use kube::{Client, ResourceExt};
use std::collections::BTreeMap;
use tracing::debug;

/// Build the usage record for a managed resource
///
/// The usage is named after the managed resource's UID, lives in its namespace,
/// is labelled with the provider config name and is owned by the managed resource.
pub fn build_usage(mg: &dyn ManagedResource) -> Result<ProviderConfigUsage> {
    let meta = mg.object_meta();
    let name = meta.name.as_deref().context("managed resource has no name")?;
    let uid = meta.uid.as_deref().context("managed resource has no UID")?;
    let namespace = meta
        .namespace
        .as_deref()
        .context("managed resource has no namespace")?;
    let reference = mg
        .provider_config_reference()
        .context("managed resource has no provider config reference")?;
    let type_meta = mg.type_meta();

    let mut usage = ProviderConfigUsage::new(
        uid,
        ProviderConfigUsageSpec {
            provider_config_ref: reference.clone(),
            resource_ref: TypedReference {
                api_version: type_meta.api_version.clone(),
                kind: type_meta.kind.clone(),
                name: name.to_string(),
            },
        },
    );
    usage.metadata.namespace = Some(namespace.to_string());
    usage.metadata.labels = Some(BTreeMap::from([(
        PROVIDER_CONFIG_LABEL.to_string(),
        reference.name.clone(),
    )]));
    usage.metadata.owner_references = Some(vec![OwnerReference {
        api_version: type_meta.api_version,
        kind: type_meta.kind,
        name: name.to_string(),
        uid: uid.to_string(),
        ..OwnerReference::default()
    }]);

    Ok(usage)
}

/// Usage tracker backed by the Kubernetes API
#[derive(Clone)]
pub struct ProviderConfigUsageTracker {
    client: Client,
    field_manager: String,
}

impl std::fmt::Debug for ProviderConfigUsageTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfigUsageTracker")
            .field("field_manager", &self.field_manager)
            .finish_non_exhaustive()
    }
}

impl ProviderConfigUsageTracker {
    /// `client` comes from `runtime::initialize`, or is built after
    /// `runtime::install_crypto_provider`
    pub fn new(client: Client, config: &ControllerConfig) -> Self {
        Self {
            client,
            field_manager: config.field_manager.clone(),
        }
    }
}

#[async_trait]
impl UsageTracker for ProviderConfigUsageTracker {
    async fn track(&self, mg: &dyn ManagedResource) -> Result<()> {
        let usage = build_usage(mg)?;
        let name = usage.name_any();
        // build_usage always sets the namespace
        let namespace = usage.namespace().unwrap_or_default();

        let api: Api<ProviderConfigUsage> = Api::namespaced(self.client.clone(), &namespace);
        api.patch(
            &name,
            &PatchParams::apply(&self.field_manager).force(),
            &Patch::Apply(&usage),
        )
        .await
        .context("cannot apply ProviderConfigUsage")?;

        debug!(
            "Tracked usage {}/{} of {} {}",
            namespace, name, usage.spec.provider_config_ref.kind, usage.spec.provider_config_ref.name
        );
        Ok(())
    }
}
