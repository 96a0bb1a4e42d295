//! Commit command implementation
//!
//! Checks a commit header against the shared conventional-commit rules.
//! With `--file`, the header is the first non-comment line of the file.

use crate::cli::common::{
    CommandError, EXIT_FAILED, EXIT_SUCCESS, GlobalOptions, OutputSettings, load_config,
    report_error,
};
use crate::commit::{CommitRules, header_of};
use crate::config::OutputFormat;
use std::fs;
use std::path::{Path, PathBuf};

/// Run the commit command
///
/// # Returns
///
/// Exit code:
/// - 0: Header passes every rule
/// - 1: One or more rules failed
/// - 2: Error (configuration/I/O error)
/// - 3: Parse error (invalid lintstack.toml)
pub fn run_commit(
    header: Option<&str>,
    file: Option<&Path>,
    format: Option<OutputFormat>,
    global: GlobalOptions,
) -> i32 {
    match run_commit_inner(header, file, format, global) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_FAILED,
        Err(e) => report_error(&e),
    }
}

fn run_commit_inner(
    header: Option<&str>,
    file: Option<&Path>,
    format: Option<OutputFormat>,
    global: GlobalOptions,
) -> Result<bool, CommandError> {
    let root = std::env::current_dir()?;
    let config = load_config(&root)?;
    let rules = CommitRules::new(config.commit.header_max_length)?;

    let header = match (header, file) {
        (Some(header), _) => header.to_string(),
        (None, Some(path)) => {
            let message = fs::read_to_string(resolve_path(&root, path))?;
            header_of(&message).to_string()
        }
        (None, None) => String::new(),
    };

    let violations = rules.check(&header);
    tracing::debug!(header = %header, violations = violations.len(), "checked commit header");

    let settings = OutputSettings::new(&config, format, global);
    let output = settings.render(
        |human| human.format_commit(&header, &violations),
        |jsonl| jsonl.format_commit(&header, &violations),
    );
    print!("{}", output);
    Ok(violations.is_empty())
}

fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
