//! Server configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str = "info";
const PRODUCTION: &str = "production";

/// Deployment environment, selecting the CORS policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Every origin is allowed.
    #[default]
    Development,
    /// Only whitelisted origins are allowed.
    Production,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(raw) if raw.eq_ignore_ascii_case(PRODUCTION) => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("invalid value for {variable}: '{value}'")]
    InvalidValue {
        /// The environment variable name.
        variable: &'static str,
        /// The rejected raw value.
        value: String,
    },
}

impl ConfigError {
    fn invalid(variable: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            variable,
            value: value.to_owned(),
        }
    }
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: IpAddr,
    /// Port to bind.
    pub port: u16,
    /// `PostgreSQL` connection string; in-memory storage is used when absent.
    pub database_url: Option<String>,
    /// Deployment environment.
    pub environment: Environment,
    /// Origins allowed in production.
    pub cors_allowed_origins: Vec<String>,
    /// `bcrypt` work factor for new password hashes.
    pub bcrypt_cost: u32,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            database_url: None,
            environment: Environment::Development,
            cors_allowed_origins: Vec::new(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// Recognised variables: `HOST`, `PORT`, `DATABASE_URL`, `APP_ENV`,
    /// `CORS_ALLOWED_ORIGINS` (comma-separated), `BCRYPT_COST` and
    /// `RUST_LOG`. Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sup::config::{Environment, ServerConfig};
    ///
    /// let config = ServerConfig::from_lookup(|name| match name {
    ///     "PORT" => Some("3000".to_owned()),
    ///     "APP_ENV" => Some("production".to_owned()),
    ///     _ => None,
    /// })
    /// .expect("valid configuration");
    /// assert_eq!(config.port, 3000);
    /// assert_eq!(config.environment, Environment::Production);
    /// assert!(config.database_url.is_none());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host_raw = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let host = host_raw
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::invalid("HOST", &host_raw))?;

        let port = match read("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::invalid("PORT", &raw))?,
        };

        let bcrypt_cost = match read("BCRYPT_COST") {
            None => bcrypt::DEFAULT_COST,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|cost| (4..=31).contains(cost))
                .ok_or_else(|| ConfigError::invalid("BCRYPT_COST", &raw))?,
        };

        let cors_allowed_origins = read("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url: read("DATABASE_URL"),
            environment: Environment::parse(read("APP_ENV").as_deref()),
            cors_allowed_origins,
            bcrypt_cost,
            log_filter: read("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
        })
    }

    /// Returns the socket address to bind.
    #[must_use]
    pub const fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
