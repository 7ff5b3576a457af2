//! # CRD Generation
//!
//! Renders the provider's CustomResourceDefinitions as a multi-document YAML stream.

use crate::crd::{ClusterProviderConfig, ProviderConfig, ProviderConfigUsage};
use kube::core::CustomResourceExt;

/// Render every CRD the provider owns, each document preceded by `---`
pub fn crd_yaml() -> Result<String, serde_yaml::Error> {
    let crds = [
        ProviderConfig::crd(),
        ClusterProviderConfig::crd(),
        ProviderConfigUsage::crd(),
    ];

    let mut out = String::new();
    for crd in &crds {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(crd)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
    use serde::Deserialize;

    #[test]
    fn test_crd_yaml_contains_all_kinds() {
        let yaml = crd_yaml().unwrap();
        let crds: Vec<CustomResourceDefinition> = serde_yaml::Deserializer::from_str(&yaml)
            .map(|doc| CustomResourceDefinition::deserialize(doc).unwrap())
            .collect();

        let names: Vec<_> = crds
            .iter()
            .map(|crd| crd.metadata.name.clone().unwrap_or_default())
            .collect();
        assert_eq!(
            names,
            vec![
                "providerconfigs.helm.m.crossplane.io",
                "clusterproviderconfigs.helm.m.crossplane.io",
                "providerconfigusages.helm.m.crossplane.io",
            ]
        );
        assert_eq!(crds[0].spec.scope, "Namespaced");
        assert_eq!(crds[1].spec.scope, "Cluster");
        assert_eq!(crds[2].spec.scope, "Namespaced");
    }
}
