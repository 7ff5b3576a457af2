//! # CRD Generator
//!
//! Generates Kubernetes CustomResourceDefinition (CRD) YAML from Rust type definitions.
//!
//! ## Usage
//!
//! ```bash
//! # Generate CRD YAML
//! cargo run --bin crdgen > package/crds/helm.m.crossplane.io.yaml
//!
//! # Generate and apply directly
//! cargo run --bin crdgen | kubectl apply -f -
//! ```

fn main() {
    match provider_helm::crd::crd_yaml() {
        Ok(yaml) => {
            println!("# This file is auto-generated by crdgen");
            println!("# DO NOT EDIT THIS FILE MANUALLY");
            print!("{yaml}");
        }
        Err(e) => {
            eprintln!("Failed to serialize CRDs to YAML: {e}");
            std::process::exit(1);
        }
    }
}
