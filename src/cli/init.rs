//! Initialize a lintstack project
//!
//! Writes lintstack.toml and creates the plugin manifest directory.

use crate::config::CONFIG_FILE;
use crate::types::Flavor;
use std::fs;
use std::path::Path;

/// Directory searched for capability manifests by default
const PLUGIN_DIR: &str = ".lintstack/plugins";

/// Content for lintstack.toml with the chosen flavor filled in
fn default_config(flavor: Flavor) -> String {
    format!(
        r#"[lintstack]
version = "1"

# Shared flavor: base, data-processing, server or ui
flavor = "{flavor}"

# Directories searched for capability manifests (<dir>/<name>.toml)
plugin_dirs = ["{PLUGIN_DIR}"]

# Project layers are applied after the flavor's layers, in order
# [[layers]]
# name = "project/legacy"
# files = ["src/legacy/**"]
# rules = {{ "no-console" = "off", "max-params" = ["warn", 8] }}

[commit]
header_max_length = 72

[output]
format = "human"
color = "auto"
"#
    )
}

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path error
    #[error("Path error: {0}")]
    Path(String),
}

/// Result of init command
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InitResult {
    /// Files that were created
    pub created: Vec<String>,
    /// Files that were skipped (already existed)
    pub skipped: Vec<String>,
    /// Files that were overwritten
    pub overwritten: Vec<String>,
}

/// Run the init command in `root`
///
/// Creates lintstack.toml and `.lintstack/plugins/`. Existing files are
/// skipped unless `force` is set; existing directories are left alone.
pub fn run_init(root: &Path, force: bool, flavor: Flavor) -> Result<InitResult, InitError> {
    let mut result = InitResult::default();

    handle_file(
        root,
        CONFIG_FILE,
        &default_config(flavor),
        force,
        &mut result,
    )?;
    create_directory(root, PLUGIN_DIR, &mut result)?;

    Ok(result)
}

fn handle_file(
    root: &Path,
    name: &str,
    content: &str,
    force: bool,
    result: &mut InitResult,
) -> Result<(), InitError> {
    let path = root.join(name);

    if path.exists() {
        if force {
            fs::write(&path, content)?;
            result.overwritten.push(name.to_string());
        } else {
            result.skipped.push(name.to_string());
        }
    } else {
        fs::write(&path, content)?;
        result.created.push(name.to_string());
    }

    Ok(())
}

fn create_directory(root: &Path, name: &str, result: &mut InitResult) -> Result<(), InitError> {
    let dir_path = root.join(name);

    if dir_path.exists() {
        if dir_path.is_dir() {
            return Ok(());
        }
        return Err(InitError::Path(format!(
            "Path '{}' exists but is not a directory",
            name
        )));
    }

    fs::create_dir_all(&dir_path)?;
    result.created.push(format!("{}/", name));
    Ok(())
}
