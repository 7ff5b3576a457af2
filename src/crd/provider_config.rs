//! # Provider Configurations
//!
//! The namespaced `ProviderConfig` and cluster-scoped `ClusterProviderConfig`
//! custom resources, and the static kind tag used to fetch either one.

use crate::constants::{CLUSTER_PROVIDER_CONFIG_KIND, PROVIDER_CONFIG_KIND};
use crate::crd::{Identity, ProviderCredentials};
use crate::resource::ObjectKey;
use kube::{Api, Client, CustomResource, Resource};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ProviderConfig Custom Resource Definition
///
/// Configures how the provider connects to the cluster Helm releases are installed into.
/// Referenced by managed resources in the same namespace.
///
/// # Example
///
/// ```yaml
/// apiVersion: helm.m.crossplane.io/v1beta1
/// kind: ProviderConfig
/// metadata:
///   name: default
///   namespace: team-a
/// spec:
///   credentials:
///     source: Secret
///     secretRef:
///       name: cluster-config
///       key: kubeconfig
/// ```
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "ProviderConfig",
    group = "helm.m.crossplane.io",
    version = "v1beta1",
    namespaced,
    status = "ProviderConfigStatus",
    category = "crossplane",
    category = "provider",
    category = "helm",
    printcolumn = r#"{"name":"Source", "type":"string", "jsonPath":".spec.credentials.source"}, {"name":"Users", "type":"integer", "jsonPath":".status.users"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigSpec {
    /// Credentials required to connect to the target cluster
    pub credentials: ProviderCredentials,
    /// Optional identity used in addition to the kubeconfig credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

/// ClusterProviderConfig Custom Resource Definition
///
/// Cluster-scoped counterpart of `ProviderConfig`, usable from any namespace.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "ClusterProviderConfig",
    group = "helm.m.crossplane.io",
    version = "v1beta1",
    status = "ProviderConfigStatus",
    category = "crossplane",
    category = "provider",
    category = "helm",
    printcolumn = r#"{"name":"Source", "type":"string", "jsonPath":".spec.credentials.source"}, {"name":"Users", "type":"integer", "jsonPath":".status.users"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterProviderConfigSpec {
    /// Credentials required to connect to the target cluster
    pub credentials: ProviderCredentials,
    /// Optional identity used in addition to the kubeconfig credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

impl From<ClusterProviderConfigSpec> for ProviderConfigSpec {
    fn from(spec: ClusterProviderConfigSpec) -> Self {
        Self {
            credentials: spec.credentials,
            identity: spec.identity,
        }
    }
}

impl From<ProviderConfigSpec> for ClusterProviderConfigSpec {
    fn from(spec: ProviderConfigSpec) -> Self {
        Self {
            credentials: spec.credentials,
            identity: spec.identity,
        }
    }
}

/// Observed state of a provider configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigStatus {
    /// Number of managed resources currently using this configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<i64>,
}

/// The provider configuration kinds a managed resource may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderConfigKind {
    /// Namespaced, looked up in the managed resource's namespace
    ProviderConfig,
    /// Cluster-scoped
    ClusterProviderConfig,
}

impl ProviderConfigKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderConfigKind::ProviderConfig => PROVIDER_CONFIG_KIND,
            ProviderConfigKind::ClusterProviderConfig => CLUSTER_PROVIDER_CONFIG_KIND,
        }
    }

    /// Whether objects of this kind live in a namespace
    #[must_use]
    pub fn is_namespaced(&self) -> bool {
        matches!(self, ProviderConfigKind::ProviderConfig)
    }
}

impl fmt::Display for ProviderConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference named a kind that is not a provider configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider config kind {0:?}")]
pub struct UnknownProviderConfigKind(pub String);

impl FromStr for ProviderConfigKind {
    type Err = UnknownProviderConfigKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PROVIDER_CONFIG_KIND => Ok(ProviderConfigKind::ProviderConfig),
            CLUSTER_PROVIDER_CONFIG_KIND => Ok(ProviderConfigKind::ClusterProviderConfig),
            other => Err(UnknownProviderConfigKind(other.to_string())),
        }
    }
}

/// A provider configuration resource of a statically known kind
///
/// Implemented by `ProviderConfig` and `ClusterProviderConfig`. The kind's scope
/// decides which API an object reader queries.
pub trait ProviderConfigObject:
    Resource<DynamicType = ()> + Clone + fmt::Debug + DeserializeOwned + Send + Sync + 'static
{
    /// Kind tag of this type
    const KIND: ProviderConfigKind;

    /// API handle through which an object with this key is read
    ///
    /// Fails when the key's scope does not match the kind's scope.
    fn api(client: Client, key: &ObjectKey) -> anyhow::Result<Api<Self>>;

    /// Build an object with the given key and spec
    fn from_spec(key: &ObjectKey, spec: ProviderConfigSpec) -> Self;

    /// The credentials and identity this object carries
    fn provider_config_spec(&self) -> ProviderConfigSpec;
}

impl ProviderConfigObject for ProviderConfig {
    const KIND: ProviderConfigKind = ProviderConfigKind::ProviderConfig;

    fn api(client: Client, key: &ObjectKey) -> anyhow::Result<Api<Self>> {
        let namespace = key
            .namespace
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("{} {} has no namespace", Self::KIND, key.name))?;
        Ok(Api::namespaced(client, namespace))
    }

    fn from_spec(key: &ObjectKey, spec: ProviderConfigSpec) -> Self {
        let mut pc = ProviderConfig::new(&key.name, spec);
        pc.metadata.namespace.clone_from(&key.namespace);
        pc
    }

    fn provider_config_spec(&self) -> ProviderConfigSpec {
        self.spec.clone()
    }
}

impl ProviderConfigObject for ClusterProviderConfig {
    const KIND: ProviderConfigKind = ProviderConfigKind::ClusterProviderConfig;

    fn api(client: Client, _key: &ObjectKey) -> anyhow::Result<Api<Self>> {
        Ok(Api::all(client))
    }

    fn from_spec(key: &ObjectKey, spec: ProviderConfigSpec) -> Self {
        ClusterProviderConfig::new(&key.name, spec.into())
    }

    fn provider_config_spec(&self) -> ProviderConfigSpec {
        self.spec.clone().into()
    }
}
