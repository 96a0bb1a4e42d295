#![forbid(unsafe_code)]

//! Capability sources
//!
//! A source knows how to acquire a capability by name. The loader treats
//! every source failure the same way, so sources are free to report
//! precise errors.

use super::handle::{Capability, CapabilityRole, CapabilitySpec};
use crate::error::CapabilityError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Trait implemented by anything that can acquire capabilities
///
/// The trait is `Send + Sync` so independent acquisitions can run in
/// parallel.
pub trait CapabilitySource: Send + Sync {
    /// Attempts to acquire the requested capability
    fn acquire(&self, spec: &CapabilitySpec) -> Result<Capability, CapabilityError>;
}

/// In-memory set of installed capabilities
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    installed: HashMap<String, Capability>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an installed capability
    pub fn with(mut self, capability: Capability) -> Self {
        self.installed.insert(capability.name.clone(), capability);
        self
    }

    /// Marks every request in `specs` as installed
    pub fn installing<'a>(specs: impl IntoIterator<Item = &'a CapabilitySpec>) -> Self {
        specs
            .into_iter()
            .fold(Self::new(), |source, spec| source.with(Capability::for_spec(spec)))
    }
}

impl CapabilitySource for StaticSource {
    fn acquire(&self, spec: &CapabilitySpec) -> Result<Capability, CapabilityError> {
        let capability = self
            .installed
            .get(&spec.name)
            .ok_or_else(|| CapabilityError::NotInstalled(spec.name.clone()))?;
        check_role(spec, &capability.role)?;
        Ok(capability.clone())
    }
}

/// Capability manifest file (`<plugin dir>/<name>.toml`)
#[derive(Debug, Deserialize)]
struct ManifestFile {
    capability: ManifestEntry,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    #[serde(default)]
    version: Option<String>,
    /// Plugin namespace; parsers have none
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    rules: Vec<String>,
}

/// Acquires capabilities from manifest files in plugin directories
///
/// Directories are searched in order; the first manifest found wins. A
/// scoped name such as `@typescript-eslint/parser` is looked up as
/// `<dir>/@typescript-eslint/parser.toml`.
#[derive(Debug, Clone, Default)]
pub struct ManifestSource {
    dirs: Vec<PathBuf>,
}

impl ManifestSource {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    fn manifest_path(dir: &Path, name: &str) -> Option<PathBuf> {
        // Names map onto relative paths; never let one escape the plugin dir
        if name.is_empty() || name.split('/').any(|part| part.is_empty() || part == "..") {
            return None;
        }
        Some(dir.join(format!("{}.toml", name)))
    }

    fn read_manifest(path: &Path, spec: &CapabilitySpec) -> Result<Capability, CapabilityError> {
        let content = fs::read_to_string(path)?;
        let manifest: ManifestFile =
            toml::from_str(&content).map_err(|e| CapabilityError::InvalidManifest {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let entry = manifest.capability;

        if entry.name != spec.name {
            return Err(CapabilityError::InvalidManifest {
                path: path.to_path_buf(),
                message: format!(
                    "manifest declares '{}' but was found for '{}'",
                    entry.name, spec.name
                ),
            });
        }

        let role = match entry.namespace {
            Some(namespace) => CapabilityRole::Plugin { namespace },
            None => CapabilityRole::Parser,
        };
        check_role(spec, &role)?;

        Ok(Capability {
            name: entry.name,
            role,
            version: entry.version,
            rules: entry.rules.into_iter().collect(),
            origin: Some(path.to_path_buf()),
        })
    }
}

impl CapabilitySource for ManifestSource {
    fn acquire(&self, spec: &CapabilitySpec) -> Result<Capability, CapabilityError> {
        for dir in &self.dirs {
            let Some(path) = Self::manifest_path(dir, &spec.name) else {
                break;
            };
            if path.is_file() {
                return Self::read_manifest(&path, spec);
            }
        }
        Err(CapabilityError::NotInstalled(spec.name.clone()))
    }
}

fn check_role(spec: &CapabilitySpec, found: &CapabilityRole) -> Result<(), CapabilityError> {
    if &spec.role == found {
        return Ok(());
    }
    Err(CapabilityError::RoleMismatch {
        name: spec.name.clone(),
        expected: spec.role.to_string(),
        found: found.to_string(),
    })
}
