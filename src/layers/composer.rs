#![forbid(unsafe_code)]

//! Layer composition over resolved capabilities
//!
//! Composition is pure: it reads the resolved [`Capabilities`] and produces
//! layer records. A capability that failed to load contributes nothing: no
//! binding, none of its gated rule tables, and no rule keys qualified by its
//! namespace.

use super::layer::{LanguageOptions, Layer, LayerKind, RuleMap};
use crate::capability::Capabilities;
use crate::flavors;
use crate::types::{Flavor, GlobPattern, RuleKey, RuleSetting};
use serde_json::Value;

/// A declarative rule table
pub type RuleTable = Vec<(&'static str, RuleSetting)>;

/// Builds layers against one resolved capability set
#[derive(Debug, Clone, Copy)]
pub struct LayerComposer<'a> {
    capabilities: &'a Capabilities,
}

impl<'a> LayerComposer<'a> {
    pub fn new(capabilities: &'a Capabilities) -> Self {
        Self { capabilities }
    }

    pub fn capabilities(&self) -> &'a Capabilities {
        self.capabilities
    }

    /// Starts a layer that applies to all files until `files` narrows it
    pub fn layer(&self, name: impl Into<String>, kind: LayerKind) -> LayerBuilder<'a> {
        LayerBuilder {
            capabilities: self.capabilities,
            layer: Layer::new(name, kind),
        }
    }

    /// Builds the full, ordered layer sequence for a flavor
    pub fn compose(&self, flavor: Flavor) -> Vec<Layer> {
        let layers = flavors::layers(flavor, self);
        tracing::debug!(flavor = %flavor, layers = layers.len(), "composed layer sequence");
        layers
    }
}

/// Incrementally assembles one layer
#[derive(Debug)]
pub struct LayerBuilder<'a> {
    capabilities: &'a Capabilities,
    layer: Layer,
}

impl<'a> LayerBuilder<'a> {
    /// Restricts the layer to files matching any of the patterns
    pub fn files<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<GlobPattern>,
    {
        self.layer
            .patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Excludes files matching any of the patterns from this layer only
    pub fn ignores<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<GlobPattern>,
    {
        self.layer
            .exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn language(mut self, options: LanguageOptions) -> Self {
        self.layer.language = Some(options);
        self
    }

    /// Binds a plugin under its namespace if it loaded
    pub fn plugin(mut self, capability: &str) -> Self {
        if let Some(handle) = self.capabilities.get(capability)
            && let Some(namespace) = handle.namespace()
        {
            self.layer
                .bindings
                .plugins
                .insert(namespace.to_string(), handle.clone());
        }
        self
    }

    /// Binds a parser if it loaded
    pub fn parser(mut self, capability: &str) -> Self {
        if let Some(handle) = self.capabilities.get(capability) {
            self.layer.bindings.parser = Some(handle.clone());
        }
        self
    }

    /// Adds a rule table
    ///
    /// Keys qualified by the namespace of a declared but absent plugin are
    /// dropped; later entries replace earlier ones with the same key.
    pub fn rules(mut self, table: RuleTable) -> Self {
        for (name, setting) in table {
            match RuleKey::new(name) {
                Some(key) => self.insert(key, setting),
                None => tracing::debug!(rule = name, "skipping malformed rule key"),
            }
        }
        self
    }

    /// Adds already-validated rule settings
    pub fn rule_map(mut self, rules: RuleMap) -> Self {
        for (key, setting) in rules {
            self.insert(key, setting);
        }
        self
    }

    /// Adds a rule table only if the capability loaded
    ///
    /// The table is not built at all otherwise.
    pub fn gated(self, capability: &str, table: impl FnOnce() -> RuleTable) -> Self {
        if self.capabilities.is_loaded(capability) {
            self.rules(table())
        } else {
            tracing::debug!(
                layer = %self.layer.name,
                capability,
                "omitting rules for unavailable capability"
            );
            self
        }
    }

    /// Adds a plugin setting only if the capability loaded
    pub fn plugin_setting(mut self, capability: &str, name: &str, value: Value) -> Self {
        if self.capabilities.is_loaded(capability) {
            self.layer.plugin_settings.insert(name.to_string(), value);
        }
        self
    }

    pub fn build(self) -> Layer {
        self.layer
    }

    fn insert(&mut self, key: RuleKey, setting: RuleSetting) {
        if let Some(namespace) = key.namespace()
            && self.capabilities.is_namespace_absent(namespace)
        {
            return;
        }
        self.layer.settings.insert(key, setting);
    }
}
