//! # Credential Extraction
//!
//! Reads the raw credential material a resolved provider configuration points at.

use crate::clients::SecretReader;
use crate::crd::{CredentialsSource, ProviderCredentials};
use std::env::VarError;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("credentials source {0} requires a selector that is not set")]
    MissingSelector(CredentialsSource),
    #[error("secret reference {name} has no namespace and no default namespace is known")]
    MissingNamespace { name: String },
    #[error("cannot get credentials secret: {0}")]
    GetSecretFailed(#[source] anyhow::Error),
    #[error("credentials secret {namespace}/{name} has no key {key}")]
    MissingSecretKey {
        namespace: String,
        name: String,
        key: String,
    },
    #[error("credentials environment variable {0} is not set")]
    EnvNotSet(String),
    #[error("credentials environment variable {0} is not valid unicode")]
    EnvNotUnicode(String),
    #[error("cannot read credentials file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Extract the credential bytes described by `credentials`
///
/// Returns `Ok(None)` for sources with nothing to read (`None`, `InjectedIdentity`);
/// the caller then relies on the ambient identity of the provider.
/// A secret selector without a namespace falls back to `default_namespace`,
/// normally the managed resource's namespace.
pub async fn extract_credentials<R>(
    reader: &R,
    credentials: &ProviderCredentials,
    default_namespace: Option<&str>,
) -> Result<Option<Vec<u8>>, CredentialsError>
where
    R: SecretReader + ?Sized,
{
    let source = credentials.source;
    match source {
        CredentialsSource::None | CredentialsSource::InjectedIdentity => {
            debug!("Credentials source {} has nothing to extract", source);
            Ok(None)
        }
        CredentialsSource::Secret => {
            let selector = credentials
                .secret_ref
                .as_ref()
                .ok_or(CredentialsError::MissingSelector(source))?;
            let namespace = selector
                .namespace
                .as_deref()
                .or(default_namespace)
                .ok_or_else(|| CredentialsError::MissingNamespace {
                    name: selector.name.clone(),
                })?;

            debug!(
                "Reading credentials from secret {}/{} key {}",
                namespace, selector.name, selector.key
            );
            let secret = reader
                .get_secret(namespace, &selector.name)
                .await
                .map_err(CredentialsError::GetSecretFailed)?;

            secret
                .data
                .and_then(|mut data| data.remove(&selector.key))
                .map(|value| Some(value.0))
                .ok_or_else(|| CredentialsError::MissingSecretKey {
                    namespace: namespace.to_string(),
                    name: selector.name.clone(),
                    key: selector.key.clone(),
                })
        }
        CredentialsSource::Environment => {
            let selector = credentials
                .env
                .as_ref()
                .ok_or(CredentialsError::MissingSelector(source))?;
            debug!("Reading credentials from environment variable {}", selector.name);
            match std::env::var(&selector.name) {
                Ok(value) => Ok(Some(value.into_bytes())),
                Err(VarError::NotPresent) => {
                    Err(CredentialsError::EnvNotSet(selector.name.clone()))
                }
                Err(VarError::NotUnicode(_)) => {
                    Err(CredentialsError::EnvNotUnicode(selector.name.clone()))
                }
            }
        }
        CredentialsSource::Filesystem => {
            let selector = credentials
                .fs
                .as_ref()
                .ok_or(CredentialsError::MissingSelector(source))?;
            debug!("Reading credentials from file {}", selector.path);
            tokio::fs::read(&selector.path)
                .await
                .map(Some)
                .map_err(|source| CredentialsError::ReadFile {
                    path: selector.path.clone(),
                    source,
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{EnvSelector, FsSelector, SecretKeySelector};
    use async_trait::async_trait;
    use k8s_openapi::api::core::v1::Secret;
    use k8s_openapi::ByteString;
    use std::collections::BTreeMap;
    use std::io::Write;
    use std::sync::Mutex;

    /// Serves a single secret and records which namespace/name were asked for
    #[derive(Default)]
    struct StaticSecrets {
        data: BTreeMap<String, ByteString>,
        fail: bool,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SecretReader for StaticSecrets {
        async fn get_secret(&self, namespace: &str, name: &str) -> anyhow::Result<Secret> {
            self.requested
                .lock()
                .unwrap()
                .push(format!("{}/{}", namespace, name));
            if self.fail {
                anyhow::bail!("secrets \"{}\" is forbidden", name);
            }
            Ok(Secret {
                data: Some(self.data.clone()),
                ..Secret::default()
            })
        }
    }

    fn secret_credentials(namespace: Option<&str>) -> ProviderCredentials {
        ProviderCredentials {
            source: CredentialsSource::Secret,
            secret_ref: Some(SecretKeySelector {
                name: "cluster-config".to_string(),
                namespace: namespace.map(str::to_string),
                key: "kubeconfig".to_string(),
            }),
            ..ProviderCredentials::default()
        }
    }

    fn kubeconfig_secrets() -> StaticSecrets {
        StaticSecrets {
            data: BTreeMap::from([(
                "kubeconfig".to_string(),
                ByteString(b"apiVersion: v1".to_vec()),
            )]),
            ..StaticSecrets::default()
        }
    }

    #[tokio::test]
    async fn test_none_and_injected_identity_extract_nothing() {
        let reader = StaticSecrets::default();
        for source in [CredentialsSource::None, CredentialsSource::InjectedIdentity] {
            let credentials = ProviderCredentials {
                source,
                ..ProviderCredentials::default()
            };
            let extracted = extract_credentials(&reader, &credentials, None).await.unwrap();
            assert!(extracted.is_none(), "source {} should extract nothing", source);
        }
        assert!(reader.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_secret_with_explicit_namespace() {
        let reader = kubeconfig_secrets();
        let extracted =
            extract_credentials(&reader, &secret_credentials(Some("crossplane-system")), Some("team-a"))
                .await
                .unwrap();

        assert_eq!(extracted, Some(b"apiVersion: v1".to_vec()));
        assert_eq!(
            *reader.requested.lock().unwrap(),
            vec!["crossplane-system/cluster-config".to_string()]
        );
    }

    #[tokio::test]
    async fn test_secret_falls_back_to_default_namespace() {
        let reader = kubeconfig_secrets();
        extract_credentials(&reader, &secret_credentials(None), Some("team-a"))
            .await
            .unwrap();

        assert_eq!(
            *reader.requested.lock().unwrap(),
            vec!["team-a/cluster-config".to_string()]
        );
    }

    #[tokio::test]
    async fn test_secret_without_any_namespace() {
        let reader = kubeconfig_secrets();
        let err = extract_credentials(&reader, &secret_credentials(None), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialsError::MissingNamespace { .. }));
    }

    #[tokio::test]
    async fn test_secret_read_failure() {
        let reader = StaticSecrets {
            fail: true,
            ..StaticSecrets::default()
        };
        let err = extract_credentials(&reader, &secret_credentials(Some("ns")), None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot get credentials secret: secrets \"cluster-config\" is forbidden"
        );
    }

    #[tokio::test]
    async fn test_secret_missing_key() {
        let reader = StaticSecrets::default();
        let err = extract_credentials(&reader, &secret_credentials(Some("ns")), None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "credentials secret ns/cluster-config has no key kubeconfig"
        );
    }

    #[tokio::test]
    async fn test_missing_selectors() {
        let reader = StaticSecrets::default();
        for source in [
            CredentialsSource::Secret,
            CredentialsSource::Environment,
            CredentialsSource::Filesystem,
        ] {
            let credentials = ProviderCredentials {
                source,
                ..ProviderCredentials::default()
            };
            let err = extract_credentials(&reader, &credentials, Some("ns"))
                .await
                .unwrap_err();
            assert!(
                matches!(err, CredentialsError::MissingSelector(s) if s == source),
                "source {} without selector should fail, got {}",
                source,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_environment_source() {
        let reader = StaticSecrets::default();
        let name = "PROVIDER_HELM_TEST_CREDENTIALS_PRESENT";
        std::env::set_var(name, "token");

        let credentials = ProviderCredentials {
            source: CredentialsSource::Environment,
            env: Some(EnvSelector {
                name: name.to_string(),
            }),
            ..ProviderCredentials::default()
        };
        let extracted = extract_credentials(&reader, &credentials, None).await.unwrap();
        assert_eq!(extracted, Some(b"token".to_vec()));
    }

    #[tokio::test]
    async fn test_environment_source_unset() {
        let reader = StaticSecrets::default();
        let credentials = ProviderCredentials {
            source: CredentialsSource::Environment,
            env: Some(EnvSelector {
                name: "PROVIDER_HELM_TEST_CREDENTIALS_ABSENT".to_string(),
            }),
            ..ProviderCredentials::default()
        };
        let err = extract_credentials(&reader, &credentials, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialsError::EnvNotSet(ref n) if n == "PROVIDER_HELM_TEST_CREDENTIALS_ABSENT"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_environment_source_not_unicode() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let reader = StaticSecrets::default();
        let name = "PROVIDER_HELM_TEST_CREDENTIALS_NOT_UNICODE";
        std::env::set_var(name, OsStr::from_bytes(b"\xff\xfe"));

        let credentials = ProviderCredentials {
            source: CredentialsSource::Environment,
            env: Some(EnvSelector {
                name: name.to_string(),
            }),
            ..ProviderCredentials::default()
        };
        let err = extract_credentials(&reader, &credentials, None)
            .await
            .unwrap_err();
        assert!(
            matches!(err, CredentialsError::EnvNotUnicode(ref n) if n == name),
            "set but non-unicode variable must not read as unset, got {}",
            err
        );
    }

    #[tokio::test]
    async fn test_filesystem_source() {
        let reader = StaticSecrets::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"kubeconfig-bytes").unwrap();

        let credentials = ProviderCredentials {
            source: CredentialsSource::Filesystem,
            fs: Some(FsSelector {
                path: file.path().to_string_lossy().into_owned(),
            }),
            ..ProviderCredentials::default()
        };
        let extracted = extract_credentials(&reader, &credentials, None).await.unwrap();
        assert_eq!(extracted, Some(b"kubeconfig-bytes".to_vec()));
    }

    #[tokio::test]
    async fn test_filesystem_source_missing_file() {
        let reader = StaticSecrets::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").to_string_lossy().into_owned();

        let credentials = ProviderCredentials {
            source: CredentialsSource::Filesystem,
            fs: Some(FsSelector { path: path.clone() }),
            ..ProviderCredentials::default()
        };
        let err = extract_credentials(&reader, &credentials, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialsError::ReadFile { path: ref p, .. } if *p == path));
    }
}
