//! Restwire Logging
//!
//! Installs a `tracing` subscriber configured from `RESTWIRE_*` environment
//! variables, and provides logging sinks that forward request/response
//! entries from `restwire-client` into `tracing`.
//!
//! # Usage
//!
//! ```rust
//! use restwire_log::{Level, tracing_sink};
//!
//! restwire_log::init();
//!
//! let sink = tracing_sink(Level::Debug);
//! sink("Request: GET https://api.example.com/items");
//! ```
//!
//! # Environment Variables
//!
//! - `RESTWIRE_DEBUG=1` - Enable debug logging
//! - `RESTWIRE_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `RESTWIRE_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `RESTWIRE_LOG_COLOR=1|0` - Enable/disable colors
//!
//! `RUST_LOG` takes precedence over `RESTWIRE_LOG_LEVEL` when set.

use once_cell::sync::OnceCell;
use std::env;
use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

// ============================================================================
// Log Levels
// ============================================================================

/// Log level for restwire logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
    /// Off (no logging)
    Off,
}

impl Level {
    /// Get level from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Directive understood by [`EnvFilter`].
    pub fn as_directive(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_directive().to_uppercase())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line human readable output
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl Format {
    /// Get format from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LogError {
    /// A global subscriber was already installed by someone else.
    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether colors are enabled
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Json,
            color: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let debug = env_flag("RESTWIRE_DEBUG").unwrap_or(false);

        let level = env::var("RESTWIRE_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::from_str(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = env::var("RESTWIRE_LOG_FORMAT")
            .ok()
            .and_then(|s| Format::from_str(&s))
            .unwrap_or(Format::Json);

        let color = env_flag("RESTWIRE_LOG_COLOR")
            .unwrap_or_else(|| env::var("NO_COLOR").is_err() && env::var("TERM").is_ok());

        Self {
            level,
            format,
            color,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

// ============================================================================
// Subscriber
// ============================================================================

static INSTALLED: OnceCell<LogConfig> = OnceCell::new();

/// Install the global subscriber from environment configuration.
///
/// Safe to call more than once; only the first call installs anything, and
/// a subscriber installed elsewhere is left in place.
pub fn init() {
    let _ = init_with(LogConfig::from_env());
}

/// Install the global subscriber with an explicit configuration.
///
/// Returns the configuration actually in effect, which is the first one
/// installed through this crate.
pub fn init_with(config: LogConfig) -> Result<&'static LogConfig, LogError> {
    INSTALLED.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));

        let layer = match config.format {
            Format::Pretty => fmt::layer().pretty().with_ansi(config.color).boxed(),
            Format::Compact => fmt::layer().compact().with_ansi(config.color).boxed(),
            Format::Json => fmt::layer().json().boxed(),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .map_err(|e| LogError::Install(e.to_string()))?;

        Ok(config)
    })
}

/// Configuration installed by [`init`] or [`init_with`], if any.
pub fn installed() -> Option<&'static LogConfig> {
    INSTALLED.get()
}

// ============================================================================
// Sinks
// ============================================================================

/// A logging sink that forwards every entry to `tracing` at `level`.
///
/// Entries are emitted under the `restwire::wire` target so they can be
/// filtered independently, e.g. `RUST_LOG=restwire::wire=debug`.
pub fn tracing_sink(level: Level) -> impl Fn(&str) + Send + Sync + 'static {
    move |entry: &str| match level {
        Level::Trace => tracing::trace!(target: "restwire::wire", "{entry}"),
        Level::Debug => tracing::debug!(target: "restwire::wire", "{entry}"),
        Level::Info => tracing::info!(target: "restwire::wire", "{entry}"),
        Level::Warn => tracing::warn!(target: "restwire::wire", "{entry}"),
        Level::Error => tracing::error!(target: "restwire::wire", "{entry}"),
        Level::Off => {}
    }
}

/// A logging sink writing every entry to standard error.
pub fn stderr_sink() -> impl Fn(&str) + Send + Sync + 'static {
    |entry: &str| eprintln!("{entry}")
}

// ============================================================================
// Tests
// ============================================================================
