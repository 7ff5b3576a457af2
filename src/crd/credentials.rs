//! # Credentials
//!
//! Credential descriptors carried by provider configurations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the credentials of a provider configuration come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum CredentialsSource {
    /// No credentials; the provider runs with whatever it was given
    #[default]
    None,
    /// A key in a Kubernetes Secret
    Secret,
    /// The identity injected into the provider pod (workload identity, IRSA, in-cluster config)
    InjectedIdentity,
    /// An environment variable of the provider process
    Environment,
    /// A file on the provider's filesystem
    Filesystem,
}

impl CredentialsSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialsSource::None => "None",
            CredentialsSource::Secret => "Secret",
            CredentialsSource::InjectedIdentity => "InjectedIdentity",
            CredentialsSource::Environment => "Environment",
            CredentialsSource::Filesystem => "Filesystem",
        }
    }
}

impl fmt::Display for CredentialsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a key within a Secret
///
/// `namespace` may be omitted on namespaced provider configs, in which case
/// the namespace of the managed resource is used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub key: String,
}

/// Environment variable holding credentials
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvSelector {
    pub name: String,
}

/// File holding credentials
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FsSelector {
    pub path: String,
}

/// Credentials required to reach the target cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentials {
    /// Source of the credentials
    #[serde(default)]
    pub source: CredentialsSource,
    /// Secret key holding the credentials, used with source Secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<SecretKeySelector>,
    /// Environment variable holding the credentials, used with source Environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvSelector>,
    /// File holding the credentials, used with source Filesystem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<FsSelector>,
}

/// Kind of identity used to authenticate to the target cluster's API server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum IdentityType {
    GoogleApplicationCredentials,
    AzureServicePrincipalCredentials,
    AzureWorkloadIdentityCredentials,
    #[serde(rename = "AWSWebIdentityCredentials")]
    AwsWebIdentityCredentials,
    UpboundTokens,
}

/// Identity used on top of the kubeconfig credentials, e.g. for managed clusters
/// whose kubeconfig carries no token
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(rename = "type")]
    pub identity_type: IdentityType,
    #[serde(flatten)]
    pub credentials: ProviderCredentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_source_wire_names() {
        for (source, name) in [
            (CredentialsSource::None, "\"None\""),
            (CredentialsSource::Secret, "\"Secret\""),
            (CredentialsSource::InjectedIdentity, "\"InjectedIdentity\""),
            (CredentialsSource::Environment, "\"Environment\""),
            (CredentialsSource::Filesystem, "\"Filesystem\""),
        ] {
            assert_eq!(serde_json::to_string(&source).unwrap(), name);
            assert_eq!(format!("\"{}\"", source), name);
        }
    }

    #[test]
    fn test_credentials_deserialize_with_secret_ref() {
        let credentials: ProviderCredentials = serde_json::from_value(serde_json::json!({
            "source": "Secret",
            "secretRef": {"name": "cluster-config", "namespace": "crossplane-system", "key": "kubeconfig"}
        }))
        .unwrap();

        assert_eq!(credentials.source, CredentialsSource::Secret);
        let selector = credentials.secret_ref.unwrap();
        assert_eq!(selector.name, "cluster-config");
        assert_eq!(selector.namespace.as_deref(), Some("crossplane-system"));
        assert_eq!(selector.key, "kubeconfig");
        assert!(credentials.env.is_none());
        assert!(credentials.fs.is_none());
    }

    #[test]
    fn test_missing_source_defaults_to_none() {
        let credentials: ProviderCredentials = serde_json::from_str("{}").unwrap();
        assert_eq!(credentials, ProviderCredentials::default());
    }

    #[test]
    fn test_identity_inlines_credentials() {
        let identity: Identity = serde_json::from_value(serde_json::json!({
            "type": "AWSWebIdentityCredentials",
            "source": "InjectedIdentity"
        }))
        .unwrap();

        assert_eq!(identity.identity_type, IdentityType::AwsWebIdentityCredentials);
        assert_eq!(identity.credentials.source, CredentialsSource::InjectedIdentity);
    }
}
