//! Style command implementation
//!
//! Resolves the shared formatter options for every file under the given
//! paths. Every file is considered, not only scripts.

use crate::cli::common::{
    CommandError, EXIT_SUCCESS, GlobalOptions, OutputSettings, load_config, report_error,
};
use crate::config::OutputFormat;
use crate::engine::{collect_files, resolve_styles};
use crate::style::StyleConfig;
use std::path::PathBuf;

/// Run the style command
pub fn run_style(paths: &[PathBuf], format: Option<OutputFormat>, global: GlobalOptions) -> i32 {
    match run_style_inner(paths, format, global) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn run_style_inner(
    paths: &[PathBuf],
    format: Option<OutputFormat>,
    global: GlobalOptions,
) -> Result<(), CommandError> {
    let root = std::env::current_dir()?;
    let config = load_config(&root)?;
    let style = StyleConfig::shared()?;

    let files = collect_files(&root, paths, false)?;
    let styles = resolve_styles(&style, &files);

    let settings = OutputSettings::new(&config, format, global);
    let output = settings.render(
        |human| human.format_styles(&styles),
        |jsonl| jsonl.format_styles(&styles),
    );
    print!("{}", output);
    Ok(())
}
