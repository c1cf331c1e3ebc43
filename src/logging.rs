//! Tracing initialisation for the `crudsmith` binary.
//!
//! Diagnostics go to stderr so stdout stays clean for generated output
//! (`inspect --json`, `sample-schema`). Configured from the environment:
//!
//! - `CRUDSMITH_LOG_LEVEL`: trace/debug/info/warn/error (default `warn`)
//! - `CRUDSMITH_LOG_FORMAT`: `pretty` (default) or `json`
//! - `CRUDSMITH_LOG_TARGET_FILTER`: extra comma-separated filter directives
//!
//! `RUST_LOG`, when set, replaces the level.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: pretty for terminals, JSON for machines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Module filter (comma-separated directives)
    pub target_filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("CRUDSMITH_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
            format: LogFormat::parse(
                &env::var("CRUDSMITH_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            ),
            target_filter: env::var("CRUDSMITH_LOG_TARGET_FILTER").ok(),
        }
    }

    /// Tracing level for `log_level`; unknown names fall back to `warn`.
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    }

    /// Build the filter: `RUST_LOG` or the configured level, plus any valid
    /// target directives.
    pub fn env_filter(&self) -> EnvFilter {
        let mut env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        if let Some(target_filter) = &self.target_filter {
            for filter in target_filter.split(',') {
                let filter = filter.trim();
                if filter.is_empty() {
                    continue;
                }
                match filter.parse() {
                    Ok(directive) => env_filter = env_filter.add_directive(directive),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {filter}"),
                }
            }
        }
        env_filter
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("invalid"), LogFormat::Pretty);
    }

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.target_filter.is_none());
    }

    #[test]
    fn test_level_parse() {
        let mut config = LogConfig::default();
        assert_eq!(config.level(), Level::WARN);
        config.log_level = "DEBUG".to_string();
        assert_eq!(config.level(), Level::DEBUG);
        config.log_level = "loud".to_string();
        assert_eq!(config.level(), Level::WARN);
    }

    #[test]
    fn test_double_init_is_error() {
        let config = LogConfig {
            target_filter: Some("crudsmith=debug, ,not a directive!!".to_string()),
            ..LogConfig::default()
        };
        // The first call may race with other tests; only the second must fail.
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
