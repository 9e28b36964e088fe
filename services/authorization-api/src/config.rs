//! Configuration for the Authorization API service.

use std::time::Duration;

use suave_auth_core::AuthConfig;

/// Authorization API configuration
#[derive(Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database URL
    pub database_url: String,
    /// Auth core configuration (secret, algorithm, token lifetime)
    pub auth: AuthConfig,
    /// Request timeout
    pub request_timeout: Duration,
    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Anything wrong here aborts startup; the service never runs with a
    /// missing or weak secret.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        // Server port
        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Token signing
        let secret_key =
            std::env::var("SECRET_KEY").map_err(|_| ConfigError::Missing("SECRET_KEY"))?;

        let algorithm = std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string());

        let expire_minutes: u64 = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_EXPIRE_MINUTES"))?;
        if expire_minutes == 0 {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_EXPIRE_MINUTES"));
        }

        let leeway_secs: u64 = std::env::var("TOKEN_LEEWAY_SECS")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_LEEWAY_SECS"))?;

        let cache_capacity: u64 = std::env::var("TOKEN_CACHE_CAPACITY")
            .unwrap_or_else(|_| "10000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_CACHE_CAPACITY"))?;

        // Request timeout
        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        // Metrics
        let metrics_enabled = std::env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        // Build auth config
        let auth = AuthConfig::new(secret_key, &algorithm)?
            .with_token_ttl(Duration::from_secs(expire_minutes * 60))
            .with_leeway(Duration::from_secs(leeway_secs))
            .with_cache_capacity(cache_capacity);

        Ok(Self {
            http_port,
            database_url,
            auth,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // database_url carries credentials; the signing secret hides
        // behind AuthConfig's own Debug
        f.debug_struct("Config")
            .field("http_port", &self.http_port)
            .field("auth", &self.auth)
            .field("request_timeout", &self.request_timeout)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish_non_exhaustive()
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Invalid auth configuration: {0}")]
    Auth(#[from] suave_auth_core::AuthError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secret_and_database_url() {
        let config = Config {
            http_port: 8000,
            database_url: "postgres://user:hunter2@db/suave".to_string(),
            auth: AuthConfig::new("0123456789abcdef0123456789abcdef", "HS256").unwrap(),
            request_timeout: Duration::from_secs(30),
            metrics_enabled: true,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("0123456789abcdef"));
        assert!(rendered.contains("8000"));
    }
}
