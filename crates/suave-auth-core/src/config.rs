//! Configuration types for the authorization service

use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::AuthError;

/// Authorization service configuration
///
/// Validated once at construction and never mutated afterwards; every
/// component reads token lifetime and signing settings from here.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for token signing
    pub secret: String,
    /// Signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Access token lifetime; also the cache entry TTL
    pub token_ttl: Duration,
    /// Tolerated clock skew when checking token expiry
    pub leeway: Duration,
    /// Maximum number of cached tokens
    pub cache_capacity: u64,
}

impl AuthConfig {
    /// Minimum allowed secret length in bytes (256 bits)
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Default access token lifetime
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

    /// Create a new auth config
    ///
    /// # Errors
    /// Returns a configuration error when the secret is shorter than 32
    /// bytes, the algorithm name is unknown, or the algorithm is not in
    /// the HMAC family.
    pub fn new(secret: impl Into<String>, algorithm: &str) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "secret too short: got {} bytes, need at least {}",
                secret.len(),
                Self::MIN_SECRET_LENGTH
            )));
        }

        let algorithm: Algorithm = algorithm
            .parse()
            .map_err(|_| AuthError::Configuration(format!("unknown algorithm: {algorithm}")))?;
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AuthError::Configuration(format!(
                "unsupported algorithm: {algorithm:?}, only HMAC variants are allowed"
            )));
        }

        Ok(Self {
            secret,
            algorithm,
            token_ttl: Self::DEFAULT_TOKEN_TTL,
            leeway: Duration::ZERO,
            cache_capacity: 10_000,
        })
    }

    /// Set the access token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set the tolerated clock skew for expiry checks
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Set the token cache capacity
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .field("leeway", &self.leeway)
            .field("cache_capacity", &self.cache_capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_accepts_hmac_algorithms() {
        for alg in ["HS256", "HS384", "HS512"] {
            assert!(AuthConfig::new(SECRET, alg).is_ok(), "{alg} should parse");
        }
    }

    #[test]
    fn test_rejects_short_secret() {
        let err = AuthConfig::new("tiny", "HS256").unwrap_err();
        assert!(matches!(err, AuthError::Configuration(_)));
    }

    #[test]
    fn test_rejects_non_hmac_algorithms() {
        for alg in ["RS256", "ES256", "none", "hs256", ""] {
            assert!(
                AuthConfig::new(SECRET, alg).is_err(),
                "{alg:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new(SECRET, "HS256").unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(1800));
        assert_eq!(config.leeway, Duration::ZERO);
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let config = AuthConfig::new(SECRET, "HS256").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains(SECRET));
        assert!(rendered.contains("HS256"));
    }

    #[test]
    fn test_builders() {
        let config = AuthConfig::new(SECRET, "HS256")
            .unwrap()
            .with_token_ttl(Duration::from_secs(60))
            .with_leeway(Duration::from_secs(5))
            .with_cache_capacity(42);
        assert_eq!(config.token_ttl, Duration::from_secs(60));
        assert_eq!(config.leeway, Duration::from_secs(5));
        assert_eq!(config.cache_capacity, 42);
    }
}
