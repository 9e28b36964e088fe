//! Authorization service - ties together credential checks, token issuance, and the cache

use std::sync::Arc;

use suave_db::{CreateUser, DbError, UserRepository, UserRow};
use suave_types::{normalize_username, BearerToken, UserId};
use uuid::Uuid;

use crate::{
    cache::{CachedToken, TokenCache},
    config::AuthConfig,
    password::CredentialHasher,
    token::{AccessClaims, TokenIssuer},
    AuthError,
};

/// Verified token claims for protected endpoints
#[derive(Debug, Clone)]
pub struct ValidatedToken {
    /// Subject user ID
    pub user_id: UserId,
    /// Decoded claims
    pub claims: AccessClaims,
}

/// Authorization service
///
/// Provides the session lifecycle:
/// - sign-up (credential creation)
/// - sign-in (idempotent token issuance)
/// - refresh (rotate-on-use token replacement)
/// - sign-out (revocation)
/// - authorize (bearer token checks for protected endpoints)
pub struct AuthService<U: UserRepository, C: TokenCache> {
    users: Arc<U>,
    cache: Arc<C>,
    hasher: CredentialHasher,
    issuer: TokenIssuer,
}

impl<U: UserRepository, C: TokenCache> AuthService<U, C> {
    /// Create a new authorization service
    pub fn new(config: &AuthConfig, users: Arc<U>, cache: Arc<C>) -> Self {
        Self {
            users,
            cache,
            hasher: CredentialHasher::new(),
            issuer: TokenIssuer::new(config),
        }
    }

    /// Replace the credential hasher (lighter parameters for tests)
    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.hasher = hasher;
        self
    }

    // =========================================================================
    // Account lifecycle
    // =========================================================================

    /// Register a new user
    ///
    /// The username is normalized before storage so sign-in agrees with
    /// sign-up on spelling. A duplicate username is a conflict, not a
    /// database error.
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<UserRow, AuthError> {
        let username =
            normalize_username(username).map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        if password.is_empty() {
            return Err(AuthError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }

        let password_hash = self.hash_blocking(password.to_string()).await?;
        let create = CreateUser {
            id: Uuid::new_v4(),
            username,
            password_hash,
        };

        match self.users.create(create).await {
            Ok(row) => {
                tracing::info!(user_id = %row.id, "user registered");
                Ok(row)
            }
            Err(DbError::UniqueViolation) => Err(AuthError::UsernameTaken),
            Err(e) => Err(e.into()),
        }
    }

    /// Authenticate a user and hand out a token
    ///
    /// Signing in while a token is still live returns that same token;
    /// repeated sign-ins never invalidate an existing session.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<BearerToken, AuthError> {
        let username =
            normalize_username(username).map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let ok = self
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await?;
        if !ok {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let subject = user.user_id();
        if let Some(live) = self.cache.current(&subject).await {
            tracing::debug!(user_id = %user.id, "returning live token");
            return Ok(BearerToken::bearer(live.as_ref()));
        }

        let minted: CachedToken = Arc::from(self.issuer.issue(&subject)?.as_str());
        // a concurrent sign-in may land first; whoever wins, both callers
        // get the same token
        let winner = self.cache.put_if_absent(subject, minted).await;
        tracing::info!(user_id = %user.id, "sign-in issued token");
        Ok(BearerToken::bearer(winner.as_ref()))
    }

    // =========================================================================
    // Token lifecycle
    // =========================================================================

    /// Exchange a live token for a fresh one
    ///
    /// The presented token must verify and must still be the cached value
    /// for its subject; the replacement takes over the cache slot with a
    /// full TTL and the old token dies with the swap.
    pub async fn refresh(&self, presented: &str) -> Result<BearerToken, AuthError> {
        let claims = self.issuer.verify(presented)?;
        let subject = claims.user_id().ok_or(AuthError::TokenInvalid)?;

        let next: CachedToken = Arc::from(self.issuer.issue(&subject)?.as_str());
        if !self
            .cache
            .replace(subject, presented, Arc::clone(&next))
            .await
        {
            tracing::debug!(user_id = %subject, "refresh presented a stale token");
            return Err(AuthError::TokenRevoked);
        }

        tracing::info!(user_id = %subject, "token refreshed");
        Ok(BearerToken::bearer(next.as_ref()))
    }

    /// Revoke the presented token
    ///
    /// Requires a currently valid token; afterwards nothing is cached for
    /// the subject and every outstanding copy of the token is dead.
    pub async fn sign_out(&self, presented: &str) -> Result<(), AuthError> {
        let claims = self.issuer.verify(presented)?;
        let subject = claims.user_id().ok_or(AuthError::TokenInvalid)?;

        if !self.cache.remove_if_current(subject, presented).await {
            tracing::debug!(user_id = %subject, "sign-out presented a stale token");
            return Err(AuthError::TokenRevoked);
        }

        tracing::info!(user_id = %subject, "signed out");
        Ok(())
    }

    /// Check a bearer token for a protected endpoint
    ///
    /// Signature and expiry are necessary but not sufficient: the token
    /// must also match the cached value for its subject.
    pub async fn authorize(&self, presented: &str) -> Result<ValidatedToken, AuthError> {
        let claims = self.issuer.verify(presented)?;
        let subject = claims.user_id().ok_or(AuthError::TokenInvalid)?;

        match self.cache.current(&subject).await {
            Some(live) if token_matches(&live, presented) => Ok(ValidatedToken {
                user_id: subject,
                claims,
            }),
            _ => {
                tracing::debug!(user_id = %subject, "token not in cache");
                Err(AuthError::TokenRevoked)
            }
        }
    }

    // =========================================================================
    // Blocking helpers
    // =========================================================================

    async fn hash_blocking(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))?
    }

    async fn verify_blocking(&self, password: String, stored: String) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))?
    }
}

/// Constant-time check that the presented token is the live one
fn token_matches(live: &CachedToken, presented: &str) -> bool {
    use subtle::ConstantTimeEq;
    live.as_bytes().ct_eq(presented.as_bytes()).into()
}
