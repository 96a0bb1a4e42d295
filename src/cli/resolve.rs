//! Resolve command implementation
//!
//! This module implements the `lintstack resolve` command, which:
//! - Loads lintstack.toml and builds the shared configuration
//! - Discovers files (gitignore-aware)
//! - Resolves each file against the layer stack in parallel
//! - Formats output (human or JSONL)

use crate::cli::common::{
    CommandError, EXIT_SUCCESS, GlobalOptions, OutputSettings, build_shared, load_config,
    print_diagnostics, report_error,
};
use crate::config::OutputFormat;
use crate::engine::file_walker::SkipReason;
use crate::engine::{Resolver, walk_targets};
use crate::types::Flavor;
use std::path::PathBuf;

/// Run the resolve command
///
/// Only TypeScript and JavaScript sources are resolved unless `all_files`
/// is set. With `--verbose`, each file left out is named on stderr.
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error (configuration/I/O error, missing path)
/// - 3: Parse error (invalid lintstack.toml)
pub fn run_resolve(
    paths: &[PathBuf],
    flavor: Option<Flavor>,
    format: Option<OutputFormat>,
    all_files: bool,
    global: GlobalOptions,
) -> i32 {
    match run_resolve_inner(paths, flavor, format, all_files, global) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn run_resolve_inner(
    paths: &[PathBuf],
    flavor: Option<Flavor>,
    format: Option<OutputFormat>,
    all_files: bool,
    global: GlobalOptions,
) -> Result<(), CommandError> {
    let root = std::env::current_dir()?;
    let config = load_config(&root)?;
    let (shared, loader) = build_shared(&config, flavor, &root)?;
    print_diagnostics(&loader.diagnostics().entries(), global.verbose);

    let walked = walk_targets(&root, paths, !all_files, global.verbose)?;
    for skipped in &walked.skipped {
        eprintln!("Skipped {} ({})", skipped.relative, SkipReason::NotAScript);
    }
    let result = Resolver::new(&shared.stack).resolve(&walked.files);

    let settings = OutputSettings::new(&config, format, global);
    let output = settings.render(
        |human| human.format_resolved(&result.configs),
        |jsonl| jsonl.format_resolved(&result.configs),
    );
    print!("{}", output);
    Ok(())
}
