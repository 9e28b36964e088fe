//! Authorization errors

use thiserror::Error;

/// Authorization errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Token failed signature or algorithm checks
    #[error("invalid token")]
    TokenInvalid,

    /// Token has expired
    #[error("token expired")]
    TokenExpired,

    /// Token is no longer the live token for its subject
    #[error("token revoked")]
    TokenRevoked,

    /// Input was not a decodable token at all
    #[error("malformed token")]
    TokenMalformed,

    /// Wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found
    #[error("user not found")]
    UserNotFound,

    /// Username already registered
    #[error("username already registered")]
    UsernameTaken,

    /// Request payload failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<suave_db::DbError> for AuthError {
    fn from(err: suave_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::Database(err.to_string())
    }
}
