//! Web configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ADDRESS_BOOK_HOST` - Bind address (default: 127.0.0.1)
//! - `ADDRESS_BOOK_PORT` - Listen port (default: 8000)
//! - `ADDRESS_BOOK_STATIC_DIR` - Static asset directory (default: crates/web/static)
//! - `ADDRESS_BOOK_MIN_STREET_LENGTH` - Minimum street length (default: 1)
//! - `ADDRESS_BOOK_MIN_CITY_LENGTH` - Minimum city length (default: 1)
//! - `ADDRESS_BOOK_MIN_STATE_LENGTH` - Minimum state length (default: 1)
//! - `ADDRESS_BOOK_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use address_book_core::AddressRules;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Validation rules handed to the address store
    pub address_rules: AddressRules,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            static_dir: PathBuf::from("crates/web/static"),
            address_rules: AddressRules::default(),
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let env = Env(&lookup);

        let address_rules = AddressRules {
            min_street_len: env.min_length(
                "ADDRESS_BOOK_MIN_STREET_LENGTH",
                defaults.address_rules.min_street_len,
            )?,
            min_city_len: env.min_length(
                "ADDRESS_BOOK_MIN_CITY_LENGTH",
                defaults.address_rules.min_city_len,
            )?,
            min_state_len: env.min_length(
                "ADDRESS_BOOK_MIN_STATE_LENGTH",
                defaults.address_rules.min_state_len,
            )?,
        };

        Ok(Self {
            host: env.parsed("ADDRESS_BOOK_HOST", defaults.host)?,
            port: env.parsed("ADDRESS_BOOK_PORT", defaults.port)?,
            static_dir: env
                .optional("ADDRESS_BOOK_STATIC_DIR")
                .map_or(defaults.static_dir, PathBuf::from),
            address_rules,
            log_format: env.parsed("ADDRESS_BOOK_LOG_FORMAT", defaults.log_format)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.rate("SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: env.rate(
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry_traces_sample_rate,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Thin wrapper over a variable lookup with typed accessors.
struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: ToString,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// Parse a minimum field length; zero would allow empty fields.
    fn min_length(&self, key: &str, default: usize) -> Result<usize, ConfigError> {
        let value = self.parsed(key, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must be at least 1".to_string(),
            ));
        }
        Ok(value)
    }

    /// Parse a sample rate in `0.0..=1.0`.
    fn rate(&self, key: &str, default: f32) -> Result<f32, ConfigError> {
        let value = self.parsed(key, default)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("must be between 0.0 and 1.0 (got {value})"),
            ));
        }
        Ok(value)
    }
}
