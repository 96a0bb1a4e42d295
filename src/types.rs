#![forbid(unsafe_code)]

//! Core domain types for lintstack
//!
//! This module defines the fundamental values that flow through layer
//! composition and resolution: rule keys, severities, rule settings, glob
//! patterns and configuration flavors.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Shared configuration flavors
///
/// Each flavor declares a fixed set of optional capabilities and a fixed
/// layer sequence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Flavor {
    /// Typed and plain source rules shared by every project
    #[default]
    Base,
    /// Data processing, ML pipelines and retrieval systems
    DataProcessing,
    /// Node.js servers and APIs
    Server,
    /// React and Next.js front ends
    Ui,
}

impl Flavor {
    /// Returns all flavors in declaration order
    pub fn all() -> [Flavor; 4] {
        [
            Flavor::Base,
            Flavor::DataProcessing,
            Flavor::Server,
            Flavor::Ui,
        ]
    }

    /// Returns the flavor name as written in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Base => "base",
            Flavor::DataProcessing => "data-processing",
            Flavor::Server => "server",
            Flavor::Ui => "ui",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule severity
///
/// Accepts the names `off`, `warn`, `error` or the numeric levels `0`, `1`,
/// `2` when deserialized; always serializes as the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "Value")]
pub enum Severity {
    Off,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl TryFrom<Value> for Severity {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, String> {
        match &value {
            Value::String(s) => match s.as_str() {
                "off" => Ok(Severity::Off),
                "warn" => Ok(Severity::Warn),
                "error" => Ok(Severity::Error),
                other => Err(format!("unknown severity '{}'", other)),
            },
            Value::Number(n) => match n.as_u64() {
                Some(0) => Ok(Severity::Off),
                Some(1) => Ok(Severity::Warn),
                Some(2) => Ok(Severity::Error),
                _ => Err(format!("unknown severity level {}", n)),
            },
            other => Err(format!("expected a severity, found {}", other)),
        }
    }
}

/// The value half of a rule setting
///
/// Either a bare severity (`"warn"`) or a severity followed by rule options
/// (`["warn", 100]`, `["error", { "prefer": "type-imports" }]`). Options are
/// opaque to lintstack and passed through to the lint engine unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum RuleSetting {
    Level(Severity),
    Configured {
        severity: Severity,
        options: Vec<Value>,
    },
}

impl RuleSetting {
    pub fn off() -> Self {
        RuleSetting::Level(Severity::Off)
    }

    pub fn warn() -> Self {
        RuleSetting::Level(Severity::Warn)
    }

    pub fn error() -> Self {
        RuleSetting::Level(Severity::Error)
    }

    /// Creates a setting with rule options
    pub fn with_options(severity: Severity, options: impl IntoIterator<Item = Value>) -> Self {
        let options: Vec<Value> = options.into_iter().collect();
        if options.is_empty() {
            RuleSetting::Level(severity)
        } else {
            RuleSetting::Configured { severity, options }
        }
    }

    /// Returns the severity regardless of options
    pub fn severity(&self) -> Severity {
        match self {
            RuleSetting::Level(severity) => *severity,
            RuleSetting::Configured { severity, .. } => *severity,
        }
    }

    /// Returns the rule options, empty for a bare severity
    pub fn options(&self) -> &[Value] {
        match self {
            RuleSetting::Level(_) => &[],
            RuleSetting::Configured { options, .. } => options,
        }
    }

    /// Converts the setting to the JSON shape the lint engine consumes
    pub fn to_value(&self) -> Value {
        match self {
            RuleSetting::Level(severity) => Value::String(severity.as_str().to_string()),
            RuleSetting::Configured { severity, options } => {
                let mut items = Vec::with_capacity(options.len() + 1);
                items.push(Value::String(severity.as_str().to_string()));
                items.extend(options.iter().cloned());
                Value::Array(items)
            }
        }
    }
}

impl fmt::Display for RuleSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSetting::Level(severity) => f.write_str(severity.as_str()),
            RuleSetting::Configured { .. } => write!(f, "{}", self.to_value()),
        }
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl TryFrom<Value> for RuleSetting {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => {
                let mut items = items.into_iter();
                let first = items
                    .next()
                    .ok_or_else(|| "rule setting array must start with a severity".to_string())?;
                Ok(RuleSetting::with_options(Severity::try_from(first)?, items))
            }
            other => Ok(RuleSetting::Level(Severity::try_from(other)?)),
        }
    }
}

impl From<Severity> for RuleSetting {
    fn from(severity: Severity) -> Self {
        RuleSetting::Level(severity)
    }
}

/// A validated rule identifier
///
/// Rule keys must be non-empty and contain no whitespace. Plugin-provided
/// rules are qualified with the plugin namespace (`import/order`,
/// `@typescript-eslint/no-explicit-any`, `@next/next/no-img-element`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleKey(String);

impl RuleKey {
    /// Creates a new RuleKey, validating the input
    ///
    /// Returns None if the input is empty or contains whitespace
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return None;
        }
        Some(RuleKey(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the plugin namespace this rule belongs to, if any
    ///
    /// Scoped namespaces follow the lint engine's convention: `@scope/rule`
    /// belongs to `@scope`, `@scope/name/rule` to `@scope/name`.
    pub fn namespace(&self) -> Option<&str> {
        let key = self.0.as_str();
        if key.starts_with('@') {
            let first = key.find('/')?;
            match key[first + 1..].find('/') {
                Some(second) => Some(&key[..first + 1 + second]),
                None => Some(&key[..first]),
            }
        } else {
            key.find('/').map(|idx| &key[..idx])
        }
    }

    /// Returns true if the rule is provided by the given plugin namespace
    pub fn is_qualified_by(&self, namespace: &str) -> bool {
        self.namespace() == Some(namespace)
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RuleKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RuleKey::new(value).ok_or_else(|| "Invalid rule key".to_string())
    }
}

impl From<RuleKey> for String {
    fn from(key: RuleKey) -> Self {
        key.0
    }
}

/// A glob pattern for file matching
///
/// This is a simple wrapper around a string that will be compiled with the
/// `globset` crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        GlobPattern(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GlobPattern {
    fn from(pattern: String) -> Self {
        GlobPattern(pattern)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern(pattern.to_string())
    }
}
