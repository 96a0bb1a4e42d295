//! Test utilities for lintstack integration tests
#![allow(dead_code)]

use lintstack::capability::{CapabilityLoader, CapabilitySpec, StaticSource};
use lintstack::flavors;
use lintstack::{Flavor, SharedConfig};
use std::fs;
use std::path::Path;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Loader in which every capability of `flavor` is installed except `missing`
pub fn loader_without(flavor: Flavor, missing: &[&str]) -> CapabilityLoader {
    let specs: Vec<CapabilitySpec> = flavors::capabilities(flavor)
        .into_iter()
        .filter(|spec| !missing.contains(&spec.name.as_str()))
        .collect();
    CapabilityLoader::new(StaticSource::installing(&specs))
}

/// Shared configuration with every capability installed
pub fn full(flavor: Flavor) -> SharedConfig {
    let loader = loader_without(flavor, &[]);
    assert_ok!(SharedConfig::build(flavor, &loader, &[]))
}

/// Writes `files` (relative path, content) under `root`
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let path = root.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Writes a capability manifest into `<root>/.lintstack/plugins`
pub fn install_manifest(root: &Path, name: &str, namespace: Option<&str>) {
    let mut body = format!("[capability]\nname = \"{}\"\nversion = \"1.0.0\"\n", name);
    if let Some(namespace) = namespace {
        body.push_str(&format!("namespace = \"{}\"\n", namespace));
    }
    let path = format!(".lintstack/plugins/{}.toml", name);
    write_files(root, &[(&path, &body)]);
}

/// Installs manifests for every capability of `flavor`
pub fn install_flavor(root: &Path, flavor: Flavor) {
    for spec in flavors::capabilities(flavor) {
        install_manifest(root, &spec.name, spec.namespace());
    }
}
