//! PostgreSQL questionnaire repository implementation

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use suave_types::QuestionnaireId;

use crate::error::DbResult;
use crate::models::QuestionnaireRow;
use crate::repo::{CreateQuestionnaire, QuestionnaireRepository};

/// PostgreSQL questionnaire repository
#[derive(Clone)]
pub struct PgQuestionnaireRepository {
    pool: PgPool,
}

impl PgQuestionnaireRepository {
    /// Create a new questionnaire repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionnaireRepository for PgQuestionnaireRepository {
    async fn find_by_id(&self, id: QuestionnaireId) -> DbResult<Option<QuestionnaireRow>> {
        let questionnaire = sqlx::query_as::<_, QuestionnaireRow>(
            r#"
            SELECT id, username, questions, created_at
            FROM questionnaires
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(questionnaire)
    }

    async fn create(&self, questionnaire: CreateQuestionnaire) -> DbResult<QuestionnaireRow> {
        let row = sqlx::query_as::<_, QuestionnaireRow>(
            r#"
            INSERT INTO questionnaires (username, questions)
            VALUES ($1, $2)
            RETURNING id, username, questions, created_at
            "#,
        )
        .bind(&questionnaire.username)
        .bind(Json(&questionnaire.questions))
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
