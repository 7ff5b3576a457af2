//! # Fakes
//!
//! Test doubles for driving provider config resolution without a cluster:
//! a fake managed resource, a mock object reader and a counting usage tracker.
//!
//! Available to unit tests and, outside the crate, with the `fake` feature.

use crate::clients::ObjectReader;
use crate::crd::{ProviderConfigKind, ProviderConfigObject, ProviderConfigReference, ProviderConfigSpec};
use crate::resource::{ManagedResource, ObjectKey};
use crate::usage::UsageTracker;
use anyhow::Result;
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::TypeMeta;
use kube::{CustomResource, Resource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A managed resource that does nothing but reference a provider config
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "FakeManaged",
    group = "fake.m.crossplane.io",
    version = "v1alpha1",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct FakeManagedSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config_ref: Option<ProviderConfigReference>,
}

impl FakeManaged {
    pub fn with_reference(
        name: &str,
        namespace: &str,
        reference: Option<ProviderConfigReference>,
    ) -> Self {
        let mut mg = FakeManaged::new(
            name,
            FakeManagedSpec {
                provider_config_ref: reference,
            },
        );
        mg.metadata.namespace = Some(namespace.to_string());
        mg
    }

    #[must_use]
    pub fn with_uid(mut self, uid: &str) -> Self {
        self.metadata.uid = Some(uid.to_string());
        self
    }
}

impl ManagedResource for FakeManaged {
    fn object_meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn type_meta(&self) -> TypeMeta {
        TypeMeta {
            api_version: FakeManaged::api_version(&()).into_owned(),
            kind: FakeManaged::kind(&()).into_owned(),
        }
    }

    fn provider_config_reference(&self) -> Option<&ProviderConfigReference> {
        self.spec.provider_config_ref.as_ref()
    }
}

type MockGetFn =
    dyn Fn(&ObjectKey, ProviderConfigKind, &mut ProviderConfigSpec) -> Result<()> + Send + Sync;

/// Object reader whose behaviour is a closure
///
/// The closure receives the requested key and kind and fills in the spec of the
/// returned object, or fails the read. Every request is recorded.
pub struct MockClient {
    get: Box<MockGetFn>,
    requests: Mutex<Vec<(ProviderConfigKind, ObjectKey)>>,
}

impl std::fmt::Debug for MockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClient")
            .field("requests", &self.requests())
            .finish_non_exhaustive()
    }
}

impl MockClient {
    pub fn new<F>(get: F) -> Self
    where
        F: Fn(&ObjectKey, ProviderConfigKind, &mut ProviderConfigSpec) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        Self {
            get: Box::new(get),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests made so far, in order
    pub fn requests(&self) -> Vec<(ProviderConfigKind, ObjectKey)> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ObjectReader for MockClient {
    async fn get<K>(&self, key: &ObjectKey) -> Result<K>
    where
        K: ProviderConfigObject,
    {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((K::KIND, key.clone()));
        }
        let mut spec = ProviderConfigSpec::default();
        (self.get)(key, K::KIND, &mut spec)?;
        Ok(K::from_spec(key, spec))
    }
}

type MockTrackFn = dyn Fn(&dyn ManagedResource) -> Result<()> + Send + Sync;

/// Usage tracker that counts its invocations
pub struct MockTracker {
    track: Box<MockTrackFn>,
    calls: AtomicUsize,
}

impl std::fmt::Debug for MockTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTracker")
            .field("calls", &self.calls())
            .finish_non_exhaustive()
    }
}

impl MockTracker {
    pub fn new<F>(track: F) -> Self
    where
        F: Fn(&dyn ManagedResource) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            track: Box::new(track),
            calls: AtomicUsize::new(0),
        }
    }

    /// A tracker that always succeeds
    pub fn succeeding() -> Self {
        Self::new(|_| Ok(()))
    }

    /// A tracker that always fails with `message`
    pub fn failing(message: &'static str) -> Self {
        Self::new(move |_| Err(anyhow::anyhow!(message)))
    }

    /// Number of times `track` was called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UsageTracker for MockTracker {
    async fn track(&self, mg: &dyn ManagedResource) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.track)(mg)
    }
}
