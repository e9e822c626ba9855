//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `DB_MAX_CONNECTIONS` - Pool ceiling (default: 10)
//! - `DB_MIN_CONNECTIONS` - Pool floor (default: 2)
//! - `DB_ACQUIRE_TIMEOUT_SECS` - Seconds to wait for a pooled connection (default: 10)
//! - `REQUEST_TIMEOUT_SECS` - Per-request deadline, at least 1 (default: 30)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Connection pool limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum open connections.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// How long a request waits for a free connection.
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Server application configuration.
///
/// `Debug` output never contains the database URL; `SecretString` redacts it.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Connection pool limits
    pub pool: PoolConfig,
    /// Deadline for a single request
    pub request_timeout: Duration,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_owned()))?;

        let host = parse_or_default(&lookup, "HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or_default(&lookup, "PORT", 3000)?;

        let defaults = PoolConfig::default();
        let pool = PoolConfig {
            max_connections: parse_or_default(
                &lookup,
                "DB_MAX_CONNECTIONS",
                defaults.max_connections,
            )?,
            min_connections: parse_or_default(
                &lookup,
                "DB_MIN_CONNECTIONS",
                defaults.min_connections,
            )?,
            acquire_timeout: Duration::from_secs(parse_or_default(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )?),
        };

        if pool.max_connections == 0 || pool.min_connections > pool.max_connections {
            return Err(ConfigError::InvalidEnvVar(
                "DB_MIN_CONNECTIONS".to_owned(),
                format!(
                    "pool bounds {}..={} are empty",
                    pool.min_connections, pool.max_connections
                ),
            ));
        }

        let request_timeout =
            Duration::from_secs(parse_or_default(&lookup, "REQUEST_TIMEOUT_SECS", 30)?);
        if request_timeout.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "REQUEST_TIMEOUT_SECS".to_owned(),
                "must be at least 1".to_owned(),
            ));
        }
        let log_format = parse_or_default(&lookup, "LOG_FORMAT", LogFormat::Text)?;

        Ok(Self {
            database_url,
            host,
            port,
            pool,
            request_timeout,
            log_format,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
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

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/contacts")]).unwrap();

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert_eq!(config.pool, PoolConfig::default());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "DATABASE_URL"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/contacts"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("DB_MIN_CONNECTIONS", "0"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "3"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("LOG_FORMAT", "JSON"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.pool.max_connections, 20);
        assert_eq!(config.pool.min_connections, 0);
        assert_eq!(config.pool.acquire_timeout, Duration::from_secs(3));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/contacts"),
            ("PORT", "99999"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "PORT"));
    }

    #[test]
    fn test_empty_pool_bounds() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/contacts"),
            ("DB_MAX_CONNECTIONS", "2"),
            ("DB_MIN_CONNECTIONS", "5"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));
    }

    #[test]
    fn test_zero_request_timeout() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/contacts"),
            ("REQUEST_TIMEOUT_SECS", "0"),
        ])
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "REQUEST_TIMEOUT_SECS")
        );
    }

    #[test]
    fn test_empty_sentry_dsn_is_disabled() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/contacts"),
            ("SENTRY_DSN", ""),
        ])
        .unwrap();
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = load(&[("DATABASE_URL", "postgres://app:hunter2@db/contacts")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
