//! Logging configuration for eager-injector
//!
//! The container emits `tracing` events under the `eager_injector` target:
//! container creation and initialization at `DEBUG`, every built instance at
//! `DEBUG`, constructor choices and registry hits at `TRACE`, and wiring
//! failures at `WARN`. This module installs a subscriber for them.
//!
//! # Features
//!
//! - `logging` - Emit events (default)
//! - `logging-json` - Use JSON structured output (recommended for production)
//! - `logging-pretty` - Use colorful pretty output (recommended for development)
//!
//! # Example
//!
//! ```rust,ignore
//! use eager_injector::logging;
//!
//! // Initialize with default settings (JSON if logging-json, pretty if logging-pretty)
//! logging::init();
//!
//! // Or use builder for custom configuration
//! logging::builder()
//!     .with_level(tracing::Level::TRACE)
//!     .injector_only()
//!     .compact()
//!     .init();
//! ```

use tracing::Level;

/// Target used by every event this crate emits
pub const TARGET: &str = "eager_injector";

/// Logging format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON structured logging (production default)
    #[default]
    Json,
    /// Pretty colorful output (development)
    Pretty,
    /// Compact single-line output
    Compact,
}

/// Builder for logging configuration
#[derive(Debug, Clone)]
pub struct LoggingBuilder {
    level: Level,
    format: LogFormat,
    target: Option<&'static str>,
    respect_env: bool,
    with_file: bool,
    with_line_number: bool,
    with_thread_ids: bool,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::Json,
            target: None,
            respect_env: false,
            with_file: false,
            with_line_number: false,
            with_thread_ids: false,
        }
    }
}

impl LoggingBuilder {
    /// Create a new logging builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set log level to TRACE (shows constructor selection and registry hits)
    pub fn trace(self) -> Self {
        self.with_level(Level::TRACE)
    }

    /// Set log level to DEBUG
    pub fn debug(self) -> Self {
        self.with_level(Level::DEBUG)
    }

    /// Set log level to WARN (wiring failures only)
    pub fn warn(self) -> Self {
        self.with_level(Level::WARN)
    }

    /// Filter to only show logs from a specific target
    pub fn with_target_filter(mut self, target: &'static str) -> Self {
        self.target = Some(target);
        self
    }

    /// Only show eager-injector logs
    pub fn injector_only(self) -> Self {
        self.with_target_filter(TARGET)
    }

    /// Prefer `RUST_LOG` over the configured level and target when it is set
    pub fn from_env(mut self) -> Self {
        self.respect_env = true;
        self
    }

    /// Include file names in log output
    pub fn with_file(mut self) -> Self {
        self.with_file = true;
        self
    }

    /// Include line numbers in log output
    pub fn with_line_number(mut self) -> Self {
        self.with_line_number = true;
        self
    }

    /// Include thread IDs in log output
    pub fn with_thread_ids(mut self) -> Self {
        self.with_thread_ids = true;
        self
    }

    /// Use JSON structured logging format
    pub fn json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }

    /// Use pretty colorful logging format
    pub fn pretty(mut self) -> Self {
        self.format = LogFormat::Pretty;
        self
    }

    /// Use compact single-line logging format
    pub fn compact(mut self) -> Self {
        self.format = LogFormat::Compact;
        self
    }

    /// Filter directive equivalent to the configured level and target
    pub fn directive(&self) -> String {
        let level = self.level.as_str().to_ascii_lowercase();
        match self.target {
            Some(target) => format!("{target}={level}"),
            None => level,
        }
    }

    /// Install the global subscriber.
    ///
    /// Does nothing if a global subscriber is already set.
    /// Requires either `logging-json` or `logging-pretty` feature to be enabled.
    #[cfg(any(feature = "logging-json", feature = "logging-pretty"))]
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Install the global subscriber, reporting if one is already set
    #[cfg(any(feature = "logging-json", feature = "logging-pretty"))]
    pub fn try_init(self) -> Result<(), tracing_subscriber::util::TryInitError> {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let filter = if self.respect_env {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directive()))
        } else {
            EnvFilter::new(self.directive())
        };

        let layer = fmt::layer()
            .with_file(self.with_file)
            .with_line_number(self.with_line_number)
            .with_thread_ids(self.with_thread_ids)
            .with_target(true);

        let registry = tracing_subscriber::registry().with(filter);
        match self.format {
            #[cfg(feature = "logging-json")]
            LogFormat::Json => registry.with(layer.json()).try_init(),
            // Fall back to pretty if json not enabled
            #[cfg(not(feature = "logging-json"))]
            LogFormat::Json => registry.with(layer.pretty()).try_init(),
            LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
            LogFormat::Compact => registry.with(layer.compact()).try_init(),
        }
    }

    /// Initialize (no-op when subscriber features not available)
    #[cfg(not(any(feature = "logging-json", feature = "logging-pretty")))]
    pub fn init(self) {
        // No-op: tracing-subscriber not enabled
    }
}

/// Create a new logging builder
pub fn builder() -> LoggingBuilder {
    LoggingBuilder::new()
}

/// Initialize logging with default settings
///
/// Uses JSON format if `logging-json` feature is enabled,
/// otherwise uses pretty format if `logging-pretty` is enabled.
/// `RUST_LOG` overrides the default `debug` level.
pub fn init() {
    #[cfg(feature = "logging-json")]
    builder().json().from_env().init();

    #[cfg(all(feature = "logging-pretty", not(feature = "logging-json")))]
    builder().pretty().from_env().init();
}

/// Initialize JSON structured logging
///
/// # Example output
/// ```json
/// {"timestamp":"2026-01-01T00:00:00.000Z","level":"DEBUG","target":"eager_injector","fields":{"message":"Instance built","service":"app::UserService","arity":0}}
/// ```
pub fn init_json() {
    builder().json().debug().init();
}

/// Initialize pretty colorful logging
pub fn init_pretty() {
    builder().pretty().debug().init();
}

/// Initialize logging for eager-injector only (filters other crates)
pub fn init_injector_only() {
    builder().injector_only().debug().init();
}
