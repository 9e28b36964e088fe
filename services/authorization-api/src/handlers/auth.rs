//! Session handlers (sign-up, sign-in, refresh, sign-out, me)

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::instrument;

use suave_db::UserRepository;
use suave_types::BearerToken;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthUser, Bearer};
use crate::state::AppState;

/// Record HTTP operation duration with result label
#[inline]
fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let result = if success { "ok" } else { "err" };
    metrics::histogram!(
        "auth_operation_duration_seconds",
        "operation" => operation,
        "result" => result
    )
    .record(start.elapsed().as_secs_f64());
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub username: String,
    pub created_at: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/authorization-service/v1/sign-up
///
/// Register a new account
#[instrument(skip_all, fields(username = %form.username))]
pub async fn sign_up(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> ApiResult<(StatusCode, Json<SignUpResponse>)> {
    let start = Instant::now();

    let user = state.auth.sign_up(&form.username, &form.password).await?;

    metrics::counter!("auth_sign_ups_total").increment(1);
    record_op_duration("sign_up", start, true);

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            id: user.id.to_string(),
            username: user.username,
        }),
    ))
}

/// POST /api/authorization-service/v1/sign-in
///
/// Exchange credentials for a bearer token
#[instrument(skip_all, fields(username = %form.username))]
pub async fn sign_in(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> ApiResult<Json<BearerToken>> {
    let start = Instant::now();

    let token = state.auth.sign_in(&form.username, &form.password).await?;

    metrics::counter!("auth_tokens_issued_total", "source" => "sign_in").increment(1);
    record_op_duration("sign_in", start, true);

    Ok(Json(token))
}

/// POST /api/authorization-service/v1/token
///
/// Trade the presented token for a fresh one; the old token stops working
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    Bearer(token): Bearer,
) -> ApiResult<Json<BearerToken>> {
    let start = Instant::now();

    let next = state.auth.refresh(&token).await?;

    metrics::counter!("auth_tokens_issued_total", "source" => "refresh").increment(1);
    record_op_duration("refresh", start, true);

    Ok(Json(next))
}

/// POST /api/authorization-service/v1/sign-out
///
/// Revoke the presented token
#[instrument(skip_all)]
pub async fn sign_out(
    State(state): State<AppState>,
    Bearer(token): Bearer,
) -> ApiResult<StatusCode> {
    let start = Instant::now();

    state.auth.sign_out(&token).await?;

    metrics::counter!("auth_sign_outs_total").increment(1);
    record_op_duration("sign_out", start, true);

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/authorization-service/v1/me
///
/// Return the account behind the presented token
#[instrument(skip_all, fields(user_id = %auth_user.user_id))]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<MeResponse>> {
    let user = state
        .repos
        .users
        .find_by_id(auth_user.user_id.0)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(MeResponse {
        id: user.id.to_string(),
        username: user.username,
        created_at: user.created_at.to_rfc3339(),
    }))
}
