#![forbid(unsafe_code)]

//! Path normalization and compiled glob matching
//!
//! Patterns follow the lint engine's matching rules: `*` and `?` never cross
//! a `/`, `**` spans any number of directories, and dot files are matched
//! like any other file.

use crate::error::ConfigError;
use crate::types::GlobPattern;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Normalizes a path for matching
///
/// - Convert backslashes to forward slashes
/// - Remove leading "./" segments
/// - Collapse repeated slashes
pub fn normalize_path(path: &str) -> String {
    let mut normalized = path.replace('\\', "/");

    while let Some(stripped) = normalized.strip_prefix("./") {
        normalized = stripped.to_string();
    }

    while normalized.contains("//") {
        normalized = normalized.replace("//", "/");
    }

    normalized
}

/// A compiled set of glob patterns
#[derive(Debug, Clone)]
pub struct PatternSet {
    set: GlobSet,
    len: usize,
}

impl PatternSet {
    /// Compiles `patterns`; `layer` names the owner in error messages
    pub fn compile(layer: &str, patterns: &[GlobPattern]) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern.as_str())
                .literal_separator(true)
                .build()
                .map_err(|e| ConfigError::InvalidGlob {
                    layer: layer.to_string(),
                    pattern: pattern.as_str().to_string(),
                    source: e,
                })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| ConfigError::InvalidGlob {
            layer: layer.to_string(),
            pattern: "<globset>".to_string(),
            source: e,
        })?;
        Ok(Self {
            set,
            len: patterns.len(),
        })
    }

    /// Returns true if the normalized path matches any pattern
    pub fn is_match(&self, normalized_path: &str) -> bool {
        self.len > 0 && self.set.is_match(normalized_path)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Validates patterns without keeping the compiled form
pub fn validate_patterns(owner: &str, patterns: &[GlobPattern]) -> Result<(), ConfigError> {
    PatternSet::compile(owner, patterns).map(|_| ())
}
