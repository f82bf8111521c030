//! Logging infrastructure for z.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable that overrides the configured level.
pub const LOG_ENV_VAR: &str = "Z_LOG";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// ANSI colors on stderr.
    pub color: bool,
    /// Include timestamps.
    pub timestamps: bool,
    /// Include the event target.
    pub target: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string. `fatal` and `panic` map to [`LogLevel::Error`].
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" | "fatal" | "panic" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            color: true,
            timestamps: false,
            target: false,
        }
    }
}

impl LogConfig {
    /// Create config from the `settings` section of the config file.
    ///
    /// An empty or unknown level falls back to `info`.
    pub fn from_settings(verbosity_level: &str, color: bool) -> Self {
        Self {
            level: LogLevel::parse(verbosity_level).unwrap_or_default(),
            color,
            ..Self::default()
        }
    }

    /// Apply `-v`/`-q` command line flags.
    pub fn with_verbosity(mut self, verbose: u8, quiet: bool) -> Self {
        if quiet {
            self.level = LogLevel::Error;
        } else {
            match verbose {
                0 => {}
                1 => self.level = LogLevel::Debug,
                _ => {
                    self.level = LogLevel::Trace;
                    self.target = true;
                }
            }
        }
        self
    }

    /// Apply the `Z_LOG` environment variable if it names a level.
    pub fn with_env_override(mut self) -> Self {
        if let Some(level) = std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|v| LogLevel::parse(&v))
        {
            self.level = level;
        }
        self
    }
}

/// Initialize logging to stderr with the given configuration.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::new(config.level.as_str());

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.color)
        .with_target(config.target);

    let registry = tracing_subscriber::registry().with(filter);

    if config.timestamps {
        registry
            .with(layer)
            .try_init()
            .map_err(|e| LogError::InitError(e.to_string()))
    } else {
        registry
            .with(layer.without_time())
            .try_init()
            .map_err(|e| LogError::InitError(e.to_string()))
    }
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),
}

/// Convenience macros re-exported from tracing.
pub use tracing::{debug, error, info, trace, warn};

/// Spans for per-K and per-note operations.
pub mod spans;

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("fatal"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("panic"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("invalid"), None);
        assert_eq!(LogLevel::parse(""), None);
    }

    #[test]
    fn test_log_level_from() {
        use tracing_subscriber::filter::LevelFilter;
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::INFO);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
    }

    #[test]
    fn test_from_settings() {
        let config = LogConfig::from_settings("debug", false);
        assert_eq!(config.level, LogLevel::Debug);
        assert!(!config.color);

        let config = LogConfig::from_settings("", true);
        assert_eq!(config.level, LogLevel::Info);
        assert!(config.color);

        let config = LogConfig::from_settings("nonsense", true);
        assert_eq!(config.level, LogLevel::Info);
    }

    #[test]
    fn test_verbosity_flags() {
        let base = LogConfig::from_settings("warn", true);
        assert_eq!(base.clone().with_verbosity(0, false).level, LogLevel::Warn);
        assert_eq!(base.clone().with_verbosity(1, false).level, LogLevel::Debug);

        let trace = base.clone().with_verbosity(3, false);
        assert_eq!(trace.level, LogLevel::Trace);
        assert!(trace.target);

        assert_eq!(base.with_verbosity(2, true).level, LogLevel::Error);
    }

    #[test]
    fn test_env_override() {
        let original = env::var(LOG_ENV_VAR).ok();

        env::set_var(LOG_ENV_VAR, "trace");
        let config = LogConfig::default().with_env_override();
        assert_eq!(config.level, LogLevel::Trace);

        env::set_var(LOG_ENV_VAR, "not-a-level");
        let config = LogConfig::from_settings("warn", true).with_env_override();
        assert_eq!(config.level, LogLevel::Warn);

        env::remove_var(LOG_ENV_VAR);
        if let Some(val) = original {
            env::set_var(LOG_ENV_VAR, val);
        }
    }
}
