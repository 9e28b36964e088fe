//! Error types for the Authorization API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use suave_auth_core::AuthError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Token could not be validated")]
    MalformedToken,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Invalid or expired token, please re-authenticate")]
    InvalidToken,

    #[error("You do not exist in our system, please sign up")]
    UserNotFound,

    #[error("Username is already registered")]
    UsernameTaken,

    #[error("Internal error")]
    Internal(String),

    #[error("Database error")]
    Database(#[from] suave_db::DbError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput(msg) => Self::Validation(msg),
            AuthError::TokenMalformed => Self::MalformedToken,
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            // one response for every live-token failure; which check failed
            // is not surfaced
            AuthError::TokenInvalid | AuthError::TokenExpired | AuthError::TokenRevoked => {
                Self::InvalidToken
            }
            AuthError::UserNotFound => Self::UserNotFound,
            AuthError::UsernameTaken => Self::UsernameTaken,
            AuthError::Database(msg) | AuthError::Configuration(msg) | AuthError::Internal(msg) => {
                Self::Internal(msg)
            }
        }
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedToken => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MissingToken | Self::InvalidCredentials | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::Internal(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MalformedToken => "UNPROCESSABLE_TOKEN",
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::Internal(_) | Self::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // Log internal errors; their detail never reaches the response body
        if matches!(self, Self::Internal(_) | Self::Database(_)) {
            tracing::error!(error = ?self, "Internal API error");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
