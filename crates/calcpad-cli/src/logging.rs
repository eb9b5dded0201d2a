//! Logging setup using `tracing-subscriber`
//!
//! Logs go to stderr so stdout stays clean for displays and JSON. The level
//! follows `-q`/`-v`; a `RUST_LOG` filter takes precedence when set.
//!
//! | Flags  | Level   | What shows up                         |
//! |--------|---------|---------------------------------------|
//! | `-q`   | `error` | nothing from the calculator itself    |
//! | (none) | `warn`  | unreadable scenario input             |
//! | `-v`   | `debug` | rewritten expressions, failure reasons |
//! | `-vv`  | `trace` | every token pressed                   |

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Verbosity;

/// Configuration for logging behavior
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is unset
    pub level: Level,
    /// Whether to use ANSI colors in output
    pub with_ansi: bool,
    /// Whether to include the module path in output
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Derives the level from CLI verbosity
    #[must_use]
    pub fn from_verbosity(verbosity: Verbosity) -> Self {
        let level = match verbosity {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::WARN,
            Verbosity::Verbose => Level::DEBUG,
            Verbosity::Debug => Level::TRACE,
        };
        Self {
            level,
            with_target: verbosity.is_debug(),
            ..Default::default()
        }
    }

    /// Enable or disable ANSI colors
    #[must_use]
    pub const fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(LogConfig::from_verbosity(Verbosity::Quiet).level, Level::ERROR);
        assert_eq!(LogConfig::from_verbosity(Verbosity::Normal).level, Level::WARN);
        assert_eq!(LogConfig::from_verbosity(Verbosity::Verbose).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(Verbosity::Debug).level, Level::TRACE);
    }

    #[test]
    fn test_target_only_at_debug() {
        assert!(!LogConfig::from_verbosity(Verbosity::Verbose).with_target);
        assert!(LogConfig::from_verbosity(Verbosity::Debug).with_target);
    }

    #[test]
    fn test_with_ansi() {
        assert!(!LogConfig::default().with_ansi(false).with_ansi);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LogConfig::default().with_ansi(false);
        init_logging(&config);
        init_logging(&config);
    }
}
