//! Axum extractors for authentication

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::header;

use suave_auth_core::AccessClaims;
use suave_types::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// Raw bearer token lifted from the Authorization header.
///
/// Handlers that act on the token itself (refresh, sign-out) take this;
/// validation happens inside the service call.
#[derive(Debug, Clone)]
pub struct Bearer(pub String);

impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_token(parts).map(Bearer)
    }
}

/// Authenticated user extracted from request
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub claims: AccessClaims,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = extract_token(parts)?;

        // A token must be live in the cache, not merely well-signed
        let validated = app_state.auth.authorize(&token).await.map_err(|e| {
            tracing::debug!(error = ?e, "Token validation failed");
            ApiError::from(e)
        })?;

        Ok(Self {
            user_id: validated.user_id,
            claims: validated.claims,
        })
    }
}

/// Extract a bearer token from the Authorization header
fn extract_token(parts: &Parts) -> Result<String, ApiError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::MissingToken)?;

    let auth_str = auth_header.to_str().map_err(|_| ApiError::MalformedToken)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(ApiError::MalformedToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(header::AUTHORIZATION, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_extract_token_from_bearer_header() {
        let parts = parts_with_auth("Bearer abc.def.ghi");
        assert_eq!(extract_token(&parts).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        assert!(matches!(extract_token(&parts), Err(ApiError::MissingToken)));
    }

    #[test]
    fn test_wrong_scheme_is_malformed() {
        let parts = parts_with_auth("Basic dXNlcjpwYXNz");
        assert!(matches!(
            extract_token(&parts),
            Err(ApiError::MalformedToken)
        ));
    }

    #[test]
    fn test_empty_bearer_value_is_malformed() {
        let parts = parts_with_auth("Bearer ");
        assert!(matches!(
            extract_token(&parts),
            Err(ApiError::MalformedToken)
        ));
    }
}
