//! Error types for lintstack
//!
//! Configuration and capability errors are kept separate: capability errors
//! never escape the loader (they degrade to an absent slot plus a warning),
//! while configuration errors surface to the CLI.

use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML syntax or shape
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// A glob pattern could not be compiled
    #[error("Invalid glob pattern '{pattern}' in layer '{layer}': {source}")]
    InvalidGlob {
        layer: String,
        pattern: String,
        source: globset::Error,
    },

    /// A regular expression could not be compiled
    #[error("Invalid regex: {0}")]
    InvalidRegex(String),
}

/// Reasons a capability could not be acquired
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    /// No source knows about the capability
    #[error("{0} is not installed")]
    NotInstalled(String),

    /// A manifest exists but is malformed
    #[error("Invalid capability manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// The capability exists but provides a different role than requested
    #[error("Capability {name} provides {found}, expected {expected}")]
    RoleMismatch {
        name: String,
        expected: String,
        found: String,
    },

    /// I/O error while reading a manifest
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
