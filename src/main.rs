//! Lintstack CLI entry point

use clap::Parser;
use lintstack::cli::{Cli, Command, GlobalOptions, common};
use lintstack::logging::init_tracing;
use std::process;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let global = GlobalOptions {
        color: cli.color,
        verbose: cli.verbose,
    };

    let exit_code = match cli.command {
        Command::Init { force, flavor } => run_init(force, flavor),
        Command::Layers { flavor, format } => {
            lintstack::cli::layers::run_layers(flavor, format, global)
        }
        Command::Plugins { flavor, format } => {
            lintstack::cli::plugins::run_plugins(flavor, format, global)
        }
        Command::Resolve {
            paths,
            flavor,
            format,
            all_files,
        } => lintstack::cli::resolve::run_resolve(&paths, flavor, format, all_files, global),
        Command::Style { paths, format } => {
            lintstack::cli::style::run_style(&paths, format, global)
        }
        Command::Commit {
            header,
            file,
            format,
        } => lintstack::cli::commit::run_commit(
            header.as_deref(),
            file.as_deref(),
            format,
            global,
        ),
    };

    process::exit(exit_code);
}

fn run_init(force: bool, flavor: lintstack::Flavor) -> i32 {
    let result = std::env::current_dir()
        .map_err(lintstack::cli::init::InitError::from)
        .and_then(|root| lintstack::cli::init::run_init(&root, force, flavor));

    match result {
        Ok(result) => {
            for name in &result.created {
                println!("Created {}", name);
            }
            for name in &result.overwritten {
                println!("Overwrote {}", name);
            }
            for name in &result.skipped {
                println!("Skipped {} (already exists, use --force to overwrite)", name);
            }
            common::EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            common::EXIT_ERROR
        }
    }
}
