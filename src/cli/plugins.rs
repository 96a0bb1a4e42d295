//! Plugins command implementation
//!
//! Reports which of a flavor's optional capabilities loaded. A missing
//! capability is reported, never an error.

use crate::cli::common::{
    CommandError, EXIT_SUCCESS, GlobalOptions, OutputSettings, build_shared, load_config,
    print_diagnostics, report_error,
};
use crate::config::OutputFormat;
use crate::types::Flavor;

/// Run the plugins command
pub fn run_plugins(
    flavor: Option<Flavor>,
    format: Option<OutputFormat>,
    global: GlobalOptions,
) -> i32 {
    match run_plugins_inner(flavor, format, global) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn run_plugins_inner(
    flavor: Option<Flavor>,
    format: Option<OutputFormat>,
    global: GlobalOptions,
) -> Result<(), CommandError> {
    let root = std::env::current_dir()?;
    let config = load_config(&root)?;
    let (shared, loader) = build_shared(&config, flavor, &root)?;
    let diagnostics = loader.diagnostics().entries();
    print_diagnostics(&diagnostics, global.verbose);

    let settings = OutputSettings::new(&config, format, global);
    let output = settings.render(
        |human| human.format_capabilities(&shared.capabilities),
        |jsonl| {
            let mut output = jsonl.format_diagnostics(&diagnostics);
            output.push_str(&jsonl.format_capabilities(&shared.capabilities));
            output
        },
    );
    print!("{}", output);
    Ok(())
}
