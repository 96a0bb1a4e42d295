#![forbid(unsafe_code)]

//! Logging
//!
//! Two concerns live here:
//!
//! - [`init_tracing`] installs the process-wide subscriber the CLI uses for
//!   its own diagnostics.
//! - [`create_logger`] is the shared logger factory handed to services. Each
//!   [`Logger`] owns a private `tracing` dispatcher, so its format and level
//!   never depend on whatever global subscriber the host installed.

use serde::Serialize;
use std::fmt;
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;

/// Environment variable selecting the deployment mode
pub const NODE_ENV: &str = "NODE_ENV";

/// Environment variable selecting the verbosity threshold
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// Severity levels in npm order, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Http,
    Verbose,
    Debug,
    Silly,
}

impl LogLevel {
    pub fn all() -> [LogLevel; 7] {
        [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Http,
            LogLevel::Verbose,
            LogLevel::Debug,
            LogLevel::Silly,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Http => "http",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
            LogLevel::Silly => "silly",
        }
    }

    /// Parses a level name, ignoring ASCII case
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::all().into_iter().find(|level| level.as_str() == name)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per record
    Json,
    /// Colorized human-readable lines
    Pretty,
}

/// A service-scoped logger
///
/// Service, level and format are fixed at construction.
#[derive(Debug, Clone)]
pub struct Logger {
    service: String,
    level: LogLevel,
    format: LogFormat,
    dispatch: Dispatch,
}

/// Creates a logger configured from the process environment
///
/// Never fails: unset or unrecognized values fall back to the defaults
/// (human-readable output at `info`).
pub fn create_logger(service: impl Into<String>) -> Logger {
    Logger::from_lookup(service, |name| std::env::var(name).ok())
}

impl Logger {
    /// Creates a logger from an arbitrary environment lookup
    pub fn from_lookup<F>(service: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match lookup(NODE_ENV).as_deref() {
            Some("production") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        let level = lookup(LOG_LEVEL)
            .and_then(|name| LogLevel::parse(&name))
            .unwrap_or_default();
        Self::with_writer(service, level, format, std::io::stdout)
    }

    /// Creates a logger writing to `writer` instead of stdout
    pub fn with_writer<W>(
        service: impl Into<String>,
        level: LogLevel,
        format: LogFormat,
        writer: W,
    ) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let builder = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_max_level(tracing::Level::TRACE)
            .with_target(false);
        let dispatch = match format {
            LogFormat::Json => Dispatch::new(builder.json().finish()),
            LogFormat::Pretty => Dispatch::new(builder.with_ansi(true).finish()),
        };
        Self {
            service: service.into(),
            level,
            format,
            dispatch,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Returns true if records at `level` are emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    /// Emits a record at `level`
    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let service = self.service.as_str();
        let severity = level.as_str();
        tracing::dispatcher::with_default(&self.dispatch, || match level {
            LogLevel::Error => tracing::error!(service, severity, "{}", message),
            LogLevel::Warn => tracing::warn!(service, severity, "{}", message),
            LogLevel::Info | LogLevel::Http => tracing::info!(service, severity, "{}", message),
            LogLevel::Verbose | LogLevel::Debug => {
                tracing::debug!(service, severity, "{}", message)
            }
            LogLevel::Silly => tracing::trace!(service, severity, "{}", message),
        });
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn http(&self, message: &str) {
        self.log(LogLevel::Http, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(LogLevel::Verbose, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn silly(&self, message: &str) {
        self.log(LogLevel::Silly, message);
    }
}

/// Installs the global subscriber used by the CLI
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or debug
/// output when `verbose` is set. Output goes to stderr.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let default = if verbose {
        "lintstack=debug"
    } else {
        "lintstack=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Ignore the error if a subscriber is already installed (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
