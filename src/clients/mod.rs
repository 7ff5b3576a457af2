//! # Clients
//!
//! Resolution of the provider configuration a managed resource uses, and the
//! read-only client capabilities it needs.

pub mod credentials;
mod resolve;

pub use credentials::{extract_credentials, CredentialsError};
pub use resolve::{resolve_provider_config, ResolveError};

use crate::crd::ProviderConfigObject;
use crate::resource::ObjectKey;
use anyhow::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};

/// Reads provider configuration objects of a statically known kind
#[async_trait]
pub trait ObjectReader: Send + Sync {
    /// Fetch the object of kind `K` identified by `key`
    async fn get<K>(&self, key: &ObjectKey) -> Result<K>
    where
        K: ProviderConfigObject;
}

/// The client must be built after `runtime::install_crypto_provider`
#[async_trait]
impl ObjectReader for Client {
    async fn get<K>(&self, key: &ObjectKey) -> Result<K>
    where
        K: ProviderConfigObject,
    {
        let api = K::api(self.clone(), key)?;
        Ok(api.get(&key.name).await?)
    }
}

/// Reads Kubernetes Secrets
#[async_trait]
pub trait SecretReader: Send + Sync {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret>;
}

#[async_trait]
impl SecretReader for Client {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret> {
        let api: Api<Secret> = Api::namespaced(self.clone(), namespace);
        Ok(api.get(name).await?)
    }
}
