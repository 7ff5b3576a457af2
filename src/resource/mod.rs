//! # Resources
//!
//! The managed resource seam and object keys.

use crate::crd::ProviderConfigReference;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::TypeMeta;
use std::fmt;

/// Name and optional namespace of an object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub name: String,
    pub namespace: Option<String>,
}

impl ObjectKey {
    /// Key of a namespaced object
    pub fn namespaced(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// Key of a cluster-scoped object
    pub fn cluster(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}/{}", namespace, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A managed resource under reconciliation
///
/// Anything that reconciles against a provider configuration implements this:
/// it exposes its metadata, its type, and the reference to its provider configuration.
pub trait ManagedResource: Send + Sync {
    /// Object metadata (name, namespace, UID)
    fn object_meta(&self) -> &ObjectMeta;

    /// API version and kind of the resource
    fn type_meta(&self) -> TypeMeta;

    /// The provider configuration this resource uses, if one is set
    fn provider_config_reference(&self) -> Option<&ProviderConfigReference>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_display() {
        assert_eq!(ObjectKey::namespaced("pc", "team-a").to_string(), "team-a/pc");
        assert_eq!(ObjectKey::cluster("pc").to_string(), "pc");
    }
}
