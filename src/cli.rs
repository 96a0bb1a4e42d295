//! CLI argument parsing and command dispatch

pub mod args;
pub mod commit;
pub mod common;
pub mod init;
pub mod layers;
pub mod plugins;
pub mod resolve;
pub mod style;

// Re-export types for convenient access
pub use args::{Cli, Command};
pub use common::GlobalOptions;
