//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use suave_types::{Question, QuestionnaireId, ResponseId, UserId};
use uuid::Uuid;

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Typed user identifier for this row
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }
}

/// Questionnaire row from the database
#[derive(Debug, Clone, FromRow)]
pub struct QuestionnaireRow {
    pub id: i64,
    pub username: String,
    pub questions: Json<Vec<Question>>,
    pub created_at: DateTime<Utc>,
}

impl QuestionnaireRow {
    /// Typed questionnaire identifier for this row
    pub fn questionnaire_id(&self) -> QuestionnaireId {
        QuestionnaireId(self.id)
    }
}

/// Survey response row from the database
#[derive(Debug, Clone, FromRow)]
pub struct SurveyResponseRow {
    pub id: i64,
    pub questionnaire_id: i64,
    pub name: String,
    pub email: String,
    pub answers: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl SurveyResponseRow {
    /// Typed response identifier for this row
    pub fn response_id(&self) -> ResponseId {
        ResponseId(self.id)
    }
}
