//! Parsing and validation for lintstack.toml configuration files

use crate::commit::DEFAULT_HEADER_MAX_LENGTH;
use crate::error::ConfigError;
use crate::layers::RuleMap;
use crate::layers::matcher::validate_patterns;
use crate::types::{Flavor, GlobPattern};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "lintstack.toml";

/// Main configuration struct for lintstack.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Lintstack metadata
    pub lintstack: LintstackMeta,

    /// Project layers appended after the flavor's layers
    #[serde(default)]
    pub layers: Vec<ProjectLayer>,

    /// Commit header rules
    #[serde(default)]
    pub commit: CommitConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lintstack: LintstackMeta {
                version: "1".to_string(),
                flavor: Flavor::default(),
                plugin_dirs: default_plugin_dirs(),
            },
            layers: Vec::new(),
            commit: CommitConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Plugin directories resolved against `root`
    pub fn plugin_dirs_in(&self, root: &Path) -> Vec<PathBuf> {
        self.lintstack
            .plugin_dirs
            .iter()
            .map(|dir| {
                if dir.is_absolute() {
                    dir.clone()
                } else {
                    root.join(dir)
                }
            })
            .collect()
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.lintstack.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.lintstack.version
            )));
        }

        let mut names = HashSet::new();
        for layer in &self.layers {
            if layer.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Project layer names must not be empty".to_string(),
                ));
            }
            if !names.insert(layer.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate project layer '{}'",
                    layer.name
                )));
            }
            validate_patterns(&layer.name, &layer.files)?;
            validate_patterns(&layer.name, &layer.ignores)?;
        }

        if self.commit.header_max_length == 0 {
            return Err(ConfigError::Validation(
                "commit.header_max_length must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Lintstack metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintstackMeta {
    /// Configuration version (must be "1")
    pub version: String,

    /// Built-in flavor to start from
    #[serde(default)]
    pub flavor: Flavor,

    /// Directories searched for capability manifests
    #[serde(default = "default_plugin_dirs")]
    pub plugin_dirs: Vec<PathBuf>,
}

fn default_plugin_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from(".lintstack/plugins")]
}

/// A layer declared by the consuming project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLayer {
    pub name: String,

    /// Files the layer applies to; empty means all files
    #[serde(default)]
    pub files: Vec<GlobPattern>,

    /// Files the layer never applies to
    #[serde(default)]
    pub ignores: Vec<GlobPattern>,

    #[serde(default)]
    pub rules: RuleMap,
}

/// Commit section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitConfig {
    #[serde(default = "default_header_max_length")]
    pub header_max_length: usize,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            header_max_length: DEFAULT_HEADER_MAX_LENGTH,
        }
    }
}

fn default_header_max_length() -> usize {
    DEFAULT_HEADER_MAX_LENGTH
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}
