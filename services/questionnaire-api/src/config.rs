//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Service configuration
#[derive(Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_url: String,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // database_url carries credentials
        f.debug_struct("Config")
            .field("http_port", &self.http_port)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from the environment. Missing required values
    /// abort startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let http_port = match env::var("HTTP_PORT") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid("HTTP_PORT"))?,
            Err(_) => 8001,
        };

        let request_timeout_secs: u64 = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?,
            Err(_) => 30,
        };

        Ok(Self {
            http_port,
            database_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for environment variable {0}")]
    Invalid(&'static str),
}
