//! Common helper functions shared across CLI commands
//!
//! Loading lintstack.toml, building the shared configuration and reporting
//! capability warnings all happen the same way for every command.

use crate::bundle::SharedConfig;
use crate::capability::{CapabilityLoader, Diagnostic, ManifestSource};
use crate::config::{CONFIG_FILE, ColorOption, Config, OutputFormat};
use crate::engine::file_walker::FileWalkerError;
use crate::error::ConfigError;
use crate::output::{self, HumanFormatter, JsonlFormatter};
use crate::types::Flavor;
use std::path::Path;

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Errors shared by the commands that read project configuration
#[derive(Debug, thiserror::Error)]
pub(crate) enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File walker error: {0}")]
    FileWalker(#[from] FileWalkerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// Maps the error onto a process exit code
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            CommandError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
            _ => EXIT_ERROR,
        }
    }
}

/// Prints the error and returns its exit code
pub(crate) fn report_error(e: &CommandError) -> i32 {
    eprintln!("Error: {}", e);
    e.exit_code()
}

/// Options every command accepts
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOptions {
    /// `--color`, overriding `[output] color`
    pub color: Option<ColorOption>,
    /// `--verbose`
    pub verbose: bool,
}

/// Output settings after command-line flags are applied over lintstack.toml
#[derive(Debug, Clone, Copy)]
pub(crate) struct OutputSettings {
    pub format: OutputFormat,
    pub color: bool,
}

impl OutputSettings {
    pub(crate) fn new(
        config: &Config,
        format: Option<OutputFormat>,
        global: GlobalOptions,
    ) -> Self {
        Self {
            format: format.unwrap_or(config.output.format),
            color: output::use_color(global.color.unwrap_or(config.output.color)),
        }
    }

    /// Formats with whichever formatter is selected
    pub(crate) fn render(
        &self,
        human: impl FnOnce(&HumanFormatter) -> String,
        jsonl: impl FnOnce(&JsonlFormatter) -> String,
    ) -> String {
        match self.format {
            OutputFormat::Human => human(&HumanFormatter::new(self.color)),
            OutputFormat::Jsonl => jsonl(&JsonlFormatter::new()),
        }
    }
}

/// Load lintstack.toml from `root`
///
/// A missing file is not an error: the defaults (base flavor) are used and
/// a warning is printed.
///
/// # Errors
///
/// Returns `ConfigError::Parse` if lintstack.toml is invalid TOML and
/// `ConfigError::Validation` if it fails validation.
pub(crate) fn load_config(root: &Path) -> Result<Config, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        eprintln!(
            "Warning: {} not found. Using defaults (flavor 'base'). Run 'lintstack init' to create it.",
            CONFIG_FILE
        );
        return Ok(Config::default());
    }

    Config::load(config_path)
}

/// Builds the shared configuration for `root`
///
/// `flavor` overrides the flavor named in lintstack.toml. Capability
/// manifests are looked up in the configured plugin directories. The
/// returned loader holds the diagnostics recorded while loading.
pub(crate) fn build_shared(
    config: &Config,
    flavor: Option<Flavor>,
    root: &Path,
) -> Result<(SharedConfig, CapabilityLoader), ConfigError> {
    let mut config = config.clone();
    if let Some(flavor) = flavor {
        config.lintstack.flavor = flavor;
    }
    let flavor = config.lintstack.flavor;
    let source = ManifestSource::new(config.plugin_dirs_in(root));
    tracing::debug!(flavor = %flavor, dirs = ?source.dirs(), "building shared configuration");
    let loader = CapabilityLoader::new(source);
    let shared = SharedConfig::from_config(&config, &loader)?;
    Ok((shared, loader))
}

/// Prints capability warnings on stderr
///
/// With `verbose`, the underlying acquisition failure follows each warning.
pub(crate) fn print_diagnostics(diagnostics: &[Diagnostic], verbose: bool) {
    eprint!(
        "{}",
        HumanFormatter::new(false).format_diagnostics(diagnostics, verbose)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavors;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_parse_error_exit_code() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[lintstack\nversion=").unwrap();

        let err = CommandError::from(load_config(temp.path()).unwrap_err());
        assert_eq!(err.exit_code(), EXIT_PARSE_ERROR);
    }

    #[test]
    fn test_validation_error_exit_code() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[lintstack]\nversion = \"2\"\n").unwrap();

        let err = CommandError::from(load_config(temp.path()).unwrap_err());
        assert_eq!(err.exit_code(), EXIT_ERROR);
    }

    #[test]
    fn test_build_shared_flavor_override() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();

        let (shared, loader) = build_shared(&config, Some(Flavor::Ui), temp.path()).unwrap();
        assert_eq!(shared.flavor, Flavor::Ui);
        // Nothing is installed in an empty plugin directory
        assert_eq!(
            loader.diagnostics().len(),
            flavors::capabilities(Flavor::Ui).len()
        );
        assert!(
            loader
                .diagnostics()
                .entries()
                .iter()
                .any(|d| d.guidance == flavors::UI_GUIDANCE)
        );
    }

    #[test]
    fn test_build_shared_reads_manifests() {
        let temp = TempDir::new().unwrap();
        let plugins = temp.path().join(".lintstack/plugins");
        fs::create_dir_all(&plugins).unwrap();
        fs::write(
            plugins.join("eslint-plugin-import.toml"),
            "[capability]\nname = \"eslint-plugin-import\"\nnamespace = \"import\"\n",
        )
        .unwrap();

        let (shared, loader) = build_shared(&Config::default(), None, temp.path()).unwrap();
        assert!(shared.capabilities.is_loaded("eslint-plugin-import"));
        assert_eq!(loader.diagnostics().count_for("eslint-plugin-import"), 0);
        assert_eq!(loader.diagnostics().len(), 2);
    }

    #[test]
    fn test_output_settings_flags_override_config() {
        let mut config = Config::default();
        config.output.format = OutputFormat::Jsonl;

        let settings = OutputSettings::new(&config, None, GlobalOptions::default());
        assert_eq!(settings.format, OutputFormat::Jsonl);

        let settings = OutputSettings::new(
            &config,
            Some(OutputFormat::Human),
            GlobalOptions {
                color: Some(ColorOption::Never),
                verbose: false,
            },
        );
        assert_eq!(settings.format, OutputFormat::Human);
        assert!(!settings.color);
    }
}
