#![forbid(unsafe_code)]

//! The shared configuration bundle
//!
//! Building a bundle is the one-time configuration phase: capabilities are
//! acquired (in parallel), layers are composed from whatever loaded, project
//! layers are appended, and everything is compiled once. The result is
//! immutable and safe to share across resolution threads.

use crate::capability::{Capabilities, CapabilityLoader};
use crate::commit::CommitRules;
use crate::config::{Config, ProjectLayer};
use crate::error::ConfigError;
use crate::flavors;
use crate::layers::{Layer, LayerComposer, LayerKind, LayerStack};
use crate::style::StyleConfig;
use crate::types::Flavor;

/// Everything a downstream project inherits
#[derive(Debug)]
pub struct SharedConfig {
    pub flavor: Flavor,
    pub capabilities: Capabilities,
    pub stack: LayerStack,
    pub style: StyleConfig,
    pub commit: CommitRules,
}

impl SharedConfig {
    /// Builds a flavor's configuration with extra project layers appended
    ///
    /// Capability failures never surface here; they are recorded in the
    /// loader's diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer pattern does not compile.
    pub fn build(
        flavor: Flavor,
        loader: &CapabilityLoader,
        project: &[ProjectLayer],
    ) -> Result<Self, ConfigError> {
        let capabilities = loader.load_all(&flavors::capabilities(flavor));
        let mut layers = flavors::build_layers(flavor, &capabilities);
        layers.extend(project_layers(&capabilities, project));

        Ok(Self {
            flavor,
            stack: LayerStack::compile(layers)?,
            capabilities,
            style: StyleConfig::shared()?,
            commit: CommitRules::shared()?,
        })
    }

    /// Builds the configuration described by a lintstack.toml
    pub fn from_config(config: &Config, loader: &CapabilityLoader) -> Result<Self, ConfigError> {
        let mut shared = Self::build(config.lintstack.flavor, loader, &config.layers)?;
        shared.commit = CommitRules::new(config.commit.header_max_length)?;
        Ok(shared)
    }
}

/// Turns project layer declarations into layers
///
/// Project rules pass through the same namespace filter as built-in ones,
/// so a project cannot reintroduce rules of a missing plugin.
pub fn project_layers(capabilities: &Capabilities, project: &[ProjectLayer]) -> Vec<Layer> {
    let composer = LayerComposer::new(capabilities);
    project
        .iter()
        .map(|declared| {
            composer
                .layer(declared.name.clone(), LayerKind::Project)
                .files(declared.files.iter().cloned())
                .ignores(declared.ignores.iter().cloned())
                .rule_map(declared.rules.clone())
                .build()
        })
        .collect()
}
