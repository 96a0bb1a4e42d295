#![forbid(unsafe_code)]

//! Parallel per-file resolution
//!
//! Resolution is pure, so files are simply fanned out across rayon's pool
//! against one shared, immutable layer stack.

use crate::engine::file_walker::FileEntry;
use crate::layers::{LayerStack, ResolvedConfig};
use crate::style::{StyleConfig, StyleOptions};
use rayon::prelude::*;

/// Result of resolving a batch of files
#[derive(Debug)]
pub struct ResolutionResult {
    /// One configuration per input file, in input order
    pub configs: Vec<ResolvedConfig>,
    /// Number of files resolved
    pub files_resolved: usize,
    /// Number of files excluded by a global ignore layer
    pub files_ignored: usize,
}

/// Resolves rule configurations for many files at once
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    stack: &'a LayerStack,
}

impl<'a> Resolver<'a> {
    pub fn new(stack: &'a LayerStack) -> Self {
        Self { stack }
    }

    /// Resolves every file in parallel
    pub fn resolve(&self, files: &[FileEntry]) -> ResolutionResult {
        let configs: Vec<ResolvedConfig> = files
            .par_iter()
            .map(|file| self.stack.resolve(&file.relative))
            .collect();
        let files_ignored = configs.iter().filter(|c| c.ignored).count();
        tracing::debug!(
            files = configs.len(),
            ignored = files_ignored,
            "resolved rule configurations"
        );

        ResolutionResult {
            files_resolved: configs.len(),
            files_ignored,
            configs,
        }
    }
}

/// Resolves formatter options for many files in parallel
pub fn resolve_styles(style: &StyleConfig, files: &[FileEntry]) -> Vec<(String, StyleOptions)> {
    files
        .par_iter()
        .map(|file| (file.relative.clone(), style.resolve(&file.relative)))
        .collect()
}
