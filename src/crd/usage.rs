//! # ProviderConfigUsage
//!
//! Records that a managed resource depends on a provider configuration.

use crate::crd::{ProviderConfigReference, TypedReference};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ProviderConfigUsage Custom Resource Definition
///
/// One usage exists per managed resource, named after the managed resource's UID
/// and owned by it, so it is garbage collected together with the resource.
/// A provider configuration with live usages must not be deleted.
#[derive(CustomResource, Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "ProviderConfigUsage",
    group = "helm.m.crossplane.io",
    version = "v1beta1",
    namespaced,
    category = "crossplane",
    category = "provider",
    category = "helm",
    printcolumn = r#"{"name":"Config-Name", "type":"string", "jsonPath":".spec.providerConfigRef.name"}, {"name":"Resource-Kind", "type":"string", "jsonPath":".spec.resourceRef.kind"}, {"name":"Resource-Name", "type":"string", "jsonPath":".spec.resourceRef.name"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigUsageSpec {
    /// The provider configuration being used
    pub provider_config_ref: ProviderConfigReference,
    /// The managed resource using it
    pub resource_ref: TypedReference,
}
