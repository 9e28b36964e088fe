//! Schema bootstrap
//!
//! Each service creates the tables it owns at startup. Statements are
//! idempotent so repeated boots against the same database are safe.

use tracing::info;

use crate::error::DbResult;
use crate::pool::DbPool;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            UUID PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_QUESTIONNAIRES: &str = r#"
CREATE TABLE IF NOT EXISTS questionnaires (
    id         BIGSERIAL PRIMARY KEY,
    username   TEXT NOT NULL,
    questions  JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_SURVEY_RESPONSES: &str = r#"
CREATE TABLE IF NOT EXISTS survey_responses (
    id               BIGSERIAL PRIMARY KEY,
    questionnaire_id BIGINT NOT NULL REFERENCES questionnaires(id) ON DELETE CASCADE,
    name             TEXT NOT NULL,
    email            TEXT NOT NULL,
    answers          JSONB NOT NULL,
    created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const INDEX_RESPONSES_EMAIL: &str =
    "CREATE INDEX IF NOT EXISTS idx_survey_responses_email ON survey_responses (email)";

const INDEX_RESPONSES_QUESTIONNAIRE: &str = r#"
CREATE INDEX IF NOT EXISTS idx_survey_responses_questionnaire
    ON survey_responses (questionnaire_id)
"#;

/// Create the tables owned by the authorization service
pub async fn ensure_auth_schema(pool: &DbPool) -> DbResult<()> {
    sqlx::query(CREATE_USERS).execute(pool).await?;
    info!("auth schema ready");
    Ok(())
}

/// Create the tables owned by the questionnaire service
pub async fn ensure_questionnaire_schema(pool: &DbPool) -> DbResult<()> {
    sqlx::query(CREATE_QUESTIONNAIRES).execute(pool).await?;
    sqlx::query(CREATE_SURVEY_RESPONSES).execute(pool).await?;
    sqlx::query(INDEX_RESPONSES_EMAIL).execute(pool).await?;
    sqlx::query(INDEX_RESPONSES_QUESTIONNAIRE).execute(pool).await?;
    info!("questionnaire schema ready");
    Ok(())
}
