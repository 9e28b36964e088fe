//! PostgreSQL survey response repository implementation

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use suave_types::QuestionnaireId;

use crate::error::DbResult;
use crate::models::SurveyResponseRow;
use crate::repo::{CreateSurveyResponse, SurveyResponseRepository};

/// PostgreSQL survey response repository
#[derive(Clone)]
pub struct PgSurveyResponseRepository {
    pool: PgPool,
}

impl PgSurveyResponseRepository {
    /// Create a new survey response repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SurveyResponseRepository for PgSurveyResponseRepository {
    async fn find_by_questionnaire(
        &self,
        questionnaire_id: QuestionnaireId,
    ) -> DbResult<Vec<SurveyResponseRow>> {
        let responses = sqlx::query_as::<_, SurveyResponseRow>(
            r#"
            SELECT id, questionnaire_id, name, email, answers, created_at
            FROM survey_responses
            WHERE questionnaire_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(questionnaire_id.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(responses)
    }

    async fn create(&self, response: CreateSurveyResponse) -> DbResult<SurveyResponseRow> {
        let row = sqlx::query_as::<_, SurveyResponseRow>(
            r#"
            INSERT INTO survey_responses (questionnaire_id, name, email, answers)
            VALUES ($1, $2, $3, $4)
            RETURNING id, questionnaire_id, name, email, answers, created_at
            "#,
        )
        .bind(response.questionnaire_id.0)
        .bind(&response.name)
        .bind(&response.email)
        .bind(Json(&response.answers))
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
