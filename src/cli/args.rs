//! CLI argument parsing using clap

use crate::config::{ColorOption, OutputFormat};
use crate::types::Flavor;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lintstack CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "lintstack")]
#[command(about = "Shared lint, style and commit configuration with layered per-file resolution")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (defaults to the [output] section of lintstack.toml)
    #[arg(long, global = true)]
    pub color: Option<ColorOption>,

    /// Show debug logging and the cause of each capability warning
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available lintstack subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write lintstack.toml and the plugin directory
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,

        /// Flavor to record in the new configuration
        #[arg(long, value_enum, default_value_t = Flavor::Base)]
        flavor: Flavor,
    },

    /// Print the composed layer sequence
    Layers {
        /// Flavor to compose (defaults to lintstack.toml)
        #[arg(long, value_enum)]
        flavor: Option<Flavor>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show which optional capabilities are available
    Plugins {
        /// Flavor whose capabilities to check (defaults to lintstack.toml)
        #[arg(long, value_enum)]
        flavor: Option<Flavor>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Resolve the effective rules for files
    Resolve {
        /// Files or directories to resolve (defaults to current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Flavor to resolve against (defaults to lintstack.toml)
        #[arg(long, value_enum)]
        flavor: Option<Flavor>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Include files that are not TypeScript or JavaScript sources
        #[arg(long)]
        all_files: bool,
    },

    /// Resolve formatter options for files
    Style {
        /// Files or directories to resolve (defaults to current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Check a commit message header
    Commit {
        /// Header to check
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        header: Option<String>,

        /// Read the commit message from a file (e.g. .git/COMMIT_EDITMSG)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}
