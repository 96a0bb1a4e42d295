#![forbid(unsafe_code)]

//! Capability requests, acquired handles and the resolved capability set

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// What a capability contributes once loaded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CapabilityRole {
    /// Rule definitions available under `namespace/rule`
    Plugin { namespace: String },
    /// A source parser bound into language options
    Parser,
}

impl fmt::Display for CapabilityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityRole::Plugin { namespace } => write!(f, "plugin '{}'", namespace),
            CapabilityRole::Parser => f.write_str("parser"),
        }
    }
}

/// A request for an optional capability, declared by a flavor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapabilitySpec {
    pub name: String,
    pub role: CapabilityRole,
    /// Text appended to the warning when the capability is missing
    ///
    /// None means the loader's default install hint.
    pub guidance: Option<String>,
}

impl CapabilitySpec {
    /// Requests a plugin that provides rules under `namespace`
    pub fn plugin(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: CapabilityRole::Plugin {
                namespace: namespace.into(),
            },
            guidance: None,
        }
    }

    /// Requests a source parser
    pub fn parser(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: CapabilityRole::Parser,
            guidance: None,
        }
    }

    /// Replaces the guidance text shown when this capability is missing
    pub fn with_guidance(mut self, guidance: impl Into<String>) -> Self {
        self.guidance = Some(guidance.into());
        self
    }

    /// Returns the plugin namespace, or None for parsers
    pub fn namespace(&self) -> Option<&str> {
        match &self.role {
            CapabilityRole::Plugin { namespace } => Some(namespace),
            CapabilityRole::Parser => None,
        }
    }
}

/// An acquired capability handle
///
/// Immutable once acquired; shared between layers as `Arc<Capability>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capability {
    pub name: String,
    pub role: CapabilityRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Unqualified names of the rules this capability defines
    pub rules: BTreeSet<String>,
    /// Manifest the capability was loaded from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<PathBuf>,
}

impl Capability {
    /// Creates a handle that satisfies the given request
    pub fn for_spec(spec: &CapabilitySpec) -> Self {
        Self {
            name: spec.name.clone(),
            role: spec.role.clone(),
            version: None,
            rules: BTreeSet::new(),
            origin: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.extend(rules.into_iter().map(Into::into));
        self
    }

    pub fn namespace(&self) -> Option<&str> {
        match &self.role {
            CapabilityRole::Plugin { namespace } => Some(namespace),
            CapabilityRole::Parser => None,
        }
    }
}

/// Outcome of loading one capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilitySlot {
    Loaded(Arc<Capability>),
    Absent,
}

impl CapabilitySlot {
    pub fn is_loaded(&self) -> bool {
        matches!(self, CapabilitySlot::Loaded(_))
    }

    pub fn handle(&self) -> Option<&Arc<Capability>> {
        match self {
            CapabilitySlot::Loaded(capability) => Some(capability),
            CapabilitySlot::Absent => None,
        }
    }
}

/// The resolved capability set for one configuration build
///
/// Every declared request has an entry, whether it loaded or not. This is
/// what lets composition tell "declared but absent" namespaces apart from
/// namespaces nothing declared.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    entries: BTreeMap<String, (CapabilitySpec, CapabilitySlot)>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for a request, replacing any earlier entry
    pub fn insert(&mut self, spec: CapabilitySpec, slot: CapabilitySlot) {
        self.entries.insert(spec.name.clone(), (spec, slot));
    }

    /// Returns the loaded handle for a capability name
    pub fn get(&self, name: &str) -> Option<&Arc<Capability>> {
        self.entries.get(name).and_then(|(_, slot)| slot.handle())
    }

    pub fn slot(&self, name: &str) -> Option<&CapabilitySlot> {
        self.entries.get(name).map(|(_, slot)| slot)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns true if a declared plugin owns this namespace but failed to load
    pub fn is_namespace_absent(&self, namespace: &str) -> bool {
        self.entries
            .values()
            .any(|(spec, slot)| spec.namespace() == Some(namespace) && !slot.is_loaded())
    }

    /// Namespaces of declared plugins that are not available
    pub fn absent_namespaces(&self) -> BTreeSet<&str> {
        self.entries
            .values()
            .filter(|(_, slot)| !slot.is_loaded())
            .filter_map(|(spec, _)| spec.namespace())
            .collect()
    }

    /// Iterates over all declared requests and their outcome, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&CapabilitySpec, &CapabilitySlot)> {
        self.entries.values().map(|(spec, slot)| (spec, slot))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
