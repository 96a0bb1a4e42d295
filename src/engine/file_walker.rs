//! File discovery and traversal with gitignore support
//!
//! Walks a target inside the project root, respecting `.gitignore`, and
//! reports each file with its path relative to the project root so it can be
//! matched against layer patterns. Script sources are recognized with the
//! ignore crate's TypesBuilder (ripgrep's `ts` and `js` definitions).

use crate::layers::matcher::normalize_path;
use ignore::WalkBuilder;
use ignore::types::{Types, TypesBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Path not found: {0}")]
    NotFound(PathBuf),
}

/// Recognizes TypeScript and JavaScript sources
#[derive(Clone)]
pub struct ScriptDetector {
    types: Option<Types>,
}

impl ScriptDetector {
    /// Creates a detector for ripgrep's `ts` and `js` file types
    ///
    /// If the matcher cannot be built, a warning is printed and every file is
    /// treated as a script.
    pub fn new() -> Self {
        let mut builder = TypesBuilder::new();
        builder.add_defaults();
        builder.select("ts");
        builder.select("js");

        let types = match builder.build() {
            Ok(types) => Some(types),
            Err(e) => {
                eprintln!("Warning: Failed to build script detector: {}", e);
                None
            }
        };
        Self { types }
    }

    pub fn is_script(&self, path: &Path) -> bool {
        match &self.types {
            Some(types) => types.matched(path, false).is_whitelist(),
            None => true,
        }
    }
}

impl Default for ScriptDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScriptDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptDetector")
            .field("available", &self.types.is_some())
            .finish()
    }
}

/// Reason why a file was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File is not a TypeScript or JavaScript source
    NotAScript,
    /// Entry is not a regular file (e.g., directory, symlink)
    NotAFile,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotAScript => f.write_str("not a TypeScript or JavaScript source"),
            SkipReason::NotAFile => f.write_str("not a regular file"),
        }
    }
}

/// Result of file walking - either a file to resolve or a skipped entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkResult {
    File(FileEntry),
    Skipped { path: PathBuf, reason: SkipReason },
}

/// A discovered file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileEntry {
    /// Path relative to the project root, normalized for matching
    pub relative: String,
    /// Path as found on disk
    pub path: PathBuf,
}

impl FileEntry {
    /// Creates an entry, computing its path relative to `root`
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let relative = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
            _ => path.to_string_lossy().into_owned(),
        };
        Self {
            relative: normalize_path(&relative),
            path,
        }
    }
}

/// Iterator over discovered files
pub struct FileWalker {
    root: PathBuf,
    walker: ignore::Walk,
    detector: Option<ScriptDetector>,
    verbose: bool,
}

impl FileWalker {
    /// Creates a walker over `target`, reporting paths relative to `root`
    ///
    /// # Arguments
    /// * `root` - Project root the layer patterns are relative to
    /// * `target` - File or directory to walk
    /// * `scripts_only` - If true, skip files that are not script sources
    /// * `verbose` - If true, report skipped entries instead of dropping them
    pub fn new(
        root: &Path,
        target: &Path,
        scripts_only: bool,
        verbose: bool,
    ) -> Result<Self, FileWalkerError> {
        if !target.exists() {
            return Err(FileWalkerError::NotFound(target.to_path_buf()));
        }

        let walker = WalkBuilder::new(target)
            .hidden(false) // Dot files are matched like any other file
            .git_ignore(true)
            .require_git(false)
            .filter_entry(|entry| entry.file_name() != ".git")
            .build();

        Ok(Self {
            root: root.to_path_buf(),
            walker,
            detector: scripts_only.then(ScriptDetector::new),
            verbose,
        })
    }

    /// Walks the tree and returns an iterator with skip information
    pub fn walk_with_skip_info(self) -> impl Iterator<Item = Result<WalkResult, FileWalkerError>> {
        let root = self.root;
        let detector = self.detector;
        let verbose = self.verbose;

        self.walker.filter_map(move |result| {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => return Some(Err(FileWalkerError::Walk(e))),
            };

            let skipped = |reason| {
                verbose.then(|| {
                    Ok(WalkResult::Skipped {
                        path: entry.path().to_path_buf(),
                        reason,
                    })
                })
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return skipped(SkipReason::NotAFile);
            }
            if let Some(detector) = &detector
                && !detector.is_script(entry.path())
            {
                return skipped(SkipReason::NotAScript);
            }

            Some(Ok(WalkResult::File(FileEntry::new(
                &root,
                entry.path().to_path_buf(),
            ))))
        })
    }
}

/// Files found across all targets
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WalkedFiles {
    /// Files to resolve, sorted by relative path
    pub files: Vec<FileEntry>,
    /// Files left out because they are not script sources
    ///
    /// Only recorded by a verbose walk.
    pub skipped: Vec<FileEntry>,
}

/// Collects files from every target, sorted by relative path
pub fn collect_files(
    root: &Path,
    targets: &[PathBuf],
    scripts_only: bool,
) -> Result<Vec<FileEntry>, FileWalkerError> {
    Ok(walk_targets(root, targets, scripts_only, false)?.files)
}

/// Collects files from every target, also recording skipped scripts when `verbose`
pub fn walk_targets(
    root: &Path,
    targets: &[PathBuf],
    scripts_only: bool,
    verbose: bool,
) -> Result<WalkedFiles, FileWalkerError> {
    let mut walked = WalkedFiles::default();
    for target in targets {
        let walker = FileWalker::new(root, target, scripts_only, verbose)?;
        for result in walker.walk_with_skip_info() {
            match result? {
                WalkResult::File(file) => walked.files.push(file),
                WalkResult::Skipped {
                    path,
                    reason: SkipReason::NotAScript,
                } => walked.skipped.push(FileEntry::new(root, path)),
                // Directories are walked into, not reported
                WalkResult::Skipped {
                    reason: SkipReason::NotAFile,
                    ..
                } => {}
            }
        }
    }
    for list in [&mut walked.files, &mut walked.skipped] {
        list.sort();
        list.dedup_by(|a, b| a.relative == b.relative);
    }
    Ok(walked)
}
