#![forbid(unsafe_code)]

//! Lintstack: shared lint, formatting and commit-message configuration
//!
//! A flavor declares optional capabilities (plugins and parsers) and an
//! ordered sequence of layers. Capabilities that cannot be loaded degrade to
//! absent slots plus one warning each; the layers that depend on them simply
//! lose those rules. Resolving a file folds every applicable layer in order,
//! so later layers win.

pub mod bundle;
pub mod capability;
pub mod cli;
pub mod commit;
pub mod config;
pub mod engine;
pub mod error;
pub mod flavors;
pub mod layers;
pub mod logging;
pub mod output;
pub mod style;
pub mod types;

// Re-export error types for convenient access
pub use error::{CapabilityError, ConfigError};

// Re-export core domain types for convenient access
pub use bundle::SharedConfig;
pub use capability::{CapabilityLoader, CapabilitySlot, CapabilitySpec, Diagnostic};
pub use layers::{Layer, LayerKind, LayerStack, ResolvedConfig};
pub use logging::{LogFormat, LogLevel, Logger, create_logger};
pub use types::{Flavor, GlobPattern, RuleKey, RuleSetting, Severity};
