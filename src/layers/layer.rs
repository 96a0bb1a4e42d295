#![forbid(unsafe_code)]

//! The immutable layer record

use crate::capability::Capability;
use crate::types::{GlobPattern, RuleKey, RuleSetting};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Rule settings keyed by rule, unique per layer
pub type RuleMap = BTreeMap<RuleKey, RuleSetting>;

/// Position class of a layer in the composed sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerKind {
    /// Files excluded from all processing
    GlobalIgnore,
    /// Baseline settings for one source-syntax family
    Language,
    /// Relaxes or tightens rules for a file naming convention
    Domain,
    /// Relaxes rules for test files
    Test,
    /// Relaxes rules for tooling and build configuration files
    Tooling,
    /// Declared by the consuming project in lintstack.toml
    Project,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::GlobalIgnore => "global-ignore",
            LayerKind::Language => "language",
            LayerKind::Domain => "domain",
            LayerKind::Test => "test",
            LayerKind::Tooling => "tooling",
            LayerKind::Project => "project",
        }
    }
}

/// Module system of the source files a layer covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Module,
    Script,
    Commonjs,
}

/// Parser configuration handed to the lint engine
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecma_version: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub jsx: bool,
    /// Type-check project file for typed linting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Predefined global environments (`jest`, `node`, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
}

impl LanguageOptions {
    /// ES2022 modules, the default for every shared flavor
    pub fn modern() -> Self {
        Self {
            ecma_version: Some(2022),
            source_type: Some(SourceType::Module),
            ..Self::default()
        }
    }

    pub fn with_jsx(mut self) -> Self {
        self.jsx = true;
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env.push(env.into());
        self
    }

    /// Overlays `other` on top of `self`, field by field
    pub fn overlay(&mut self, other: &LanguageOptions) {
        if other.ecma_version.is_some() {
            self.ecma_version = other.ecma_version;
        }
        if other.source_type.is_some() {
            self.source_type = other.source_type;
        }
        if other.jsx {
            self.jsx = true;
        }
        if other.project.is_some() {
            self.project.clone_from(&other.project);
        }
        for env in &other.env {
            if !self.env.contains(env) {
                self.env.push(env.clone());
            }
        }
    }
}

/// Capability handles a layer makes available
///
/// Only loaded capabilities ever appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    /// Plugins keyed by the namespace their rules use
    pub plugins: BTreeMap<String, Arc<Capability>>,
    pub parser: Option<Arc<Capability>>,
}

impl Bindings {
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty() && self.parser.is_none()
    }

    /// Returns true if any binding refers to the named capability
    pub fn contains(&self, capability: &str) -> bool {
        self.plugins.values().any(|c| c.name == capability)
            || self.parser.as_ref().is_some_and(|c| c.name == capability)
    }
}

/// One named bundle of rule settings plus the file scope it applies to
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub kind: LayerKind,
    /// Files this layer applies to; empty means all files
    pub patterns: Vec<GlobPattern>,
    /// Files this layer never applies to, whatever `patterns` says
    pub exclude_patterns: Vec<GlobPattern>,
    pub settings: RuleMap,
    pub bindings: Bindings,
    pub language: Option<LanguageOptions>,
    /// Shared settings read by plugins (`react.version`, ...)
    pub plugin_settings: BTreeMap<String, Value>,
}

impl Layer {
    /// Creates an empty layer that applies to all files
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            settings: RuleMap::new(),
            bindings: Bindings::default(),
            language: None,
            plugin_settings: BTreeMap::new(),
        }
    }

    /// Creates a global ignore layer
    pub fn global_ignores<I, P>(name: impl Into<String>, ignores: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<GlobPattern>,
    {
        let mut layer = Self::new(name, LayerKind::GlobalIgnore);
        layer.exclude_patterns = ignores.into_iter().map(Into::into).collect();
        layer
    }

    pub fn is_global_ignore(&self) -> bool {
        self.kind == LayerKind::GlobalIgnore
    }

    /// Returns the setting for a rule key, if this layer sets it
    pub fn setting(&self, key: &str) -> Option<&RuleSetting> {
        RuleKey::new(key).and_then(|key| self.settings.get(&key))
    }
}
