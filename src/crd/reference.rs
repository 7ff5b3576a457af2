//! # References
//!
//! Object references shared by managed resources and usage records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference from a managed resource to the provider configuration it uses
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigReference {
    /// Name of the provider configuration
    pub name: String,
    /// Kind of the provider configuration: ProviderConfig or ClusterProviderConfig
    pub kind: String,
}

impl ProviderConfigReference {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// Reference to an object of a specific API version and kind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypedReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
}
