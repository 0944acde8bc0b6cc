//! Application configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use placeholder_backend::outbound::jsonplaceholder::DEFAULT_USER_LIMIT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PLACEHOLDER_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
const DEFAULT_PLACEHOLDER_TIMEOUT_SECONDS: u64 = 30;

/// Configuration failures that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A mandatory variable is absent.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    /// A variable is present but unparseable.
    #[error("invalid value for {variable}: {message}")]
    Invalid {
        /// The offending variable name.
        variable: &'static str,
        /// Why parsing failed.
        message: String,
    },
}

/// Runtime settings for the server process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Base URL of the upstream test API.
    pub placeholder_base_url: Url,
    /// Users requested per refresh (`?_limit=` on the users fetch).
    pub placeholder_user_limit: u32,
    /// Request timeout for upstream fetches.
    pub placeholder_timeout: Duration,
}

fn invalid(variable: &'static str, message: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        variable,
        message: message.to_string(),
    }
}

impl AppConfig {
    /// Assemble configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is absent or any supplied
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|e| invalid("BIND_ADDR", e))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let placeholder_base_url = std::env::var("PLACEHOLDER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_PLACEHOLDER_BASE_URL.to_owned())
            .parse::<Url>()
            .map_err(|e| invalid("PLACEHOLDER_BASE_URL", e))?;

        let placeholder_user_limit = match std::env::var("PLACEHOLDER_USER_LIMIT") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|e| invalid("PLACEHOLDER_USER_LIMIT", e))?,
            Err(_) => DEFAULT_USER_LIMIT,
        };

        let timeout_seconds = match std::env::var("PLACEHOLDER_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|e| invalid("PLACEHOLDER_TIMEOUT_SECONDS", e))?,
            Err(_) => DEFAULT_PLACEHOLDER_TIMEOUT_SECONDS,
        };

        Ok(Self {
            bind_addr,
            database_url,
            placeholder_base_url,
            placeholder_user_limit,
            placeholder_timeout: Duration::from_secs(timeout_seconds),
        })
    }
}
