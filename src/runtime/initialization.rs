//! # Initialization
//!
//! `kube` is built with `rustls-tls` and no default crypto backend, so rustls
//! cannot pick a process-level `CryptoProvider` on its own. Building a
//! `kube::Client` before one is installed panics. Call [`install_crypto_provider`]
//! (or [`initialize`], which does it first) before creating any client.

use crate::config::ControllerConfig;
use crate::observability::init_tracing;
use anyhow::{Context, Result};
use kube::Client;
use tracing::{debug, info};

/// Install ring as the process-wide rustls crypto provider
///
/// Safe to call more than once; later calls keep the provider already installed.
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

/// Bootstrap a process embedding the provider
///
/// Installs the crypto provider, then the tracing subscriber, then builds a client
/// from the inferred kubeconfig or in-cluster environment.
pub async fn initialize(config: &ControllerConfig) -> Result<Client> {
    install_crypto_provider();
    init_tracing(config)?;

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;
    info!(
        "Kubernetes client ready, field manager {}",
        config.field_manager
    );
    Ok(client)
}
