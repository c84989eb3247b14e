use crate::{env_or_default, ConfigError, Environment, FromEnv};
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Output format of the fmt layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// One JSON object per event, for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Tracing subscriber configuration
///
/// Environment variables:
/// - `APP_ENV`: "production" switches the defaults to JSON output at `info`
/// - `LOG_LEVEL`: default filter directive (overridden by `RUST_LOG`)
/// - `LOG_FORMAT`: `pretty` or `json`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracingConfig {
    pub environment: Environment,
    pub default_filter: String,
    pub format: LogFormat,
}

impl TracingConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            default_filter: environment.default_log_level().to_string(),
            format: if environment.is_production() {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            },
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(Environment::default())
    }
}

impl FromEnv for TracingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::new(Environment::from_env());

        let default_filter = env_or_default("LOG_LEVEL", &defaults.default_filter);
        let format = match std::env::var("LOG_FORMAT") {
            Ok(value) => {
                value
                    .parse::<LogFormat>()
                    .map_err(|details| ConfigError::ParseError {
                        key: "LOG_FORMAT".to_string(),
                        details,
                    })?
            }
            Err(_) => defaults.format,
        };

        Ok(Self {
            default_filter,
            format,
            ..defaults
        })
    }
}

/// Initialize tracing with error span capture.
///
/// Installs a registry with:
/// - an `EnvFilter` from `RUST_LOG`, falling back to `config.default_filter`
/// - a fmt layer, JSON (flattened, no targets) or pretty per `config.format`
/// - `tracing_error::ErrorLayer` so errors can carry span traces
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place (common in tests).
pub fn init_tracing(config: &TracingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init(),
    };

    match result {
        Ok(()) => info!(
            environment = ?config.environment,
            format = ?config.format,
            "Tracing initialized"
        ),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
