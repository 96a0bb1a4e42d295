//! Layers command implementation
//!
//! Prints the composed layer sequence for a flavor, project layers
//! included, in application order.

use crate::cli::common::{
    CommandError, EXIT_SUCCESS, GlobalOptions, OutputSettings, build_shared, load_config,
    print_diagnostics, report_error,
};
use crate::config::OutputFormat;
use crate::types::Flavor;

/// Run the layers command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error (configuration/I/O error)
/// - 3: Parse error (invalid lintstack.toml)
pub fn run_layers(
    flavor: Option<Flavor>,
    format: Option<OutputFormat>,
    global: GlobalOptions,
) -> i32 {
    match run_layers_inner(flavor, format, global) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn run_layers_inner(
    flavor: Option<Flavor>,
    format: Option<OutputFormat>,
    global: GlobalOptions,
) -> Result<(), CommandError> {
    let root = std::env::current_dir()?;
    let config = load_config(&root)?;
    let (shared, loader) = build_shared(&config, flavor, &root)?;
    print_diagnostics(&loader.diagnostics().entries(), global.verbose);

    let settings = OutputSettings::new(&config, format, global);
    let output = settings.render(
        |human| human.format_layers(shared.stack.layers()),
        |jsonl| jsonl.format_layers(shared.stack.layers()),
    );
    print!("{}", output);
    Ok(())
}
