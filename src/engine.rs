//! File discovery and parallel resolution

pub mod file_walker;
pub mod resolver;

pub use file_walker::{FileEntry, FileWalker, WalkedFiles, collect_files, walk_targets};
pub use resolver::{ResolutionResult, Resolver, resolve_styles};
