//! JWT issuance and verification
//!
//! Tokens are compact HS256 JWTs carrying `{sub, iat, exp}`. Verification
//! is strict: only the configured algorithm is accepted, and expiry leeway
//! is whatever the config says, zero by default.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use suave_types::UserId;

use crate::{AuthConfig, AuthError};

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl AccessClaims {
    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Get the subject as a typed user ID
    pub fn user_id(&self) -> Option<UserId> {
        UserId::parse(&self.sub).ok()
    }
}

/// Token issuer and verifier sharing one symmetric key
#[derive(Clone)]
pub struct TokenIssuer {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenIssuer {
    /// Create a new token issuer from validated config
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(config.algorithm);
        // jsonwebtoken defaults to 60 seconds of leeway; expiry tolerance
        // is config-owned here
        validation.leeway = config.leeway.as_secs();

        Self {
            header: Header::new(config.algorithm),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl_secs: config.token_ttl.as_secs() as i64,
        }
    }

    /// Issue a fresh token for the given subject
    pub fn issue(&self, subject: &UserId) -> Result<String, AuthError> {
        let iat = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: subject.to_string(),
            iat,
            exp: iat + self.ttl_secs,
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &AccessClaims) -> Result<String, AuthError> {
        encode(&self.header, claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify a token and return its claims
    ///
    /// Distinguishes three failure classes: input that is not a decodable
    /// JWT at all, a decodable token that fails signature, algorithm, or
    /// claim checks, and a correctly signed token past its expiry.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let data =
            decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!("Token verification failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    ErrorKind::InvalidToken
                    | ErrorKind::Base64(_)
                    | ErrorKind::Json(_)
                    | ErrorKind::Utf8(_) => AuthError::TokenMalformed,
                    _ => AuthError::TokenInvalid,
                }
            })?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.header.alg)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&AuthConfig::new(SECRET, "HS256").unwrap())
    }

    fn claims_expiring_in(secs: i64) -> AccessClaims {
        let now = Utc::now().timestamp();
        AccessClaims {
            sub: UserId::new().to_string(),
            iat: now,
            exp: now + secs,
        }
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let issuer = issuer();
        let subject = UserId::new();
        let token = issuer.issue(&subject).unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, subject.to_string());
        assert_eq!(claims.user_id(), Some(subject));
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = issuer();
        let token = issuer.sign(&claims_expiring_in(-1)).unwrap();
        assert!(matches!(
            issuer.verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_zero_leeway_is_strict() {
        let issuer = issuer();
        let live = issuer.sign(&claims_expiring_in(5)).unwrap();
        assert!(issuer.verify(&live).is_ok());
        let stale = issuer.sign(&claims_expiring_in(-2)).unwrap();
        assert!(issuer.verify(&stale).is_err());
    }

    #[test]
    fn test_leeway_tolerates_skew() {
        let config = AuthConfig::new(SECRET, "HS256")
            .unwrap()
            .with_leeway(Duration::from_secs(30));
        let issuer = TokenIssuer::new(&config);
        let token = issuer.sign(&claims_expiring_in(-10)).unwrap();
        assert!(issuer.verify(&token).is_ok());
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let ours = issuer();
        let theirs = TokenIssuer::new(
            &AuthConfig::new("ffffffffffffffffffffffffffffffff", "HS256").unwrap(),
        );
        let token = theirs.issue(&UserId::new()).unwrap();
        assert!(matches!(ours.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let hs256 = issuer();
        let hs384 = TokenIssuer::new(&AuthConfig::new(SECRET, "HS384").unwrap());
        let token = hs384.issue(&UserId::new()).unwrap();
        assert!(matches!(
            hs256.verify(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_garbage_is_malformed_not_invalid() {
        let issuer = issuer();
        for garbage in ["", "not-a-token", "a.b", "a.b.c", "..", "a.b.c.d"] {
            assert!(
                matches!(issuer.verify(garbage), Err(AuthError::TokenMalformed)),
                "{garbage:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let issuer = issuer();
        let token = issuer.issue(&UserId::new()).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = format!("{}A", parts[1]);
        parts[1] = &forged;
        let tampered = parts.join(".");
        assert!(issuer.verify(&tampered).is_err());
    }
}
