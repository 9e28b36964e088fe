//! Questionnaire and survey response handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use suave_db::{
    CreateQuestionnaire, CreateSurveyResponse, QuestionnaireRepository, QuestionnaireRow,
    SurveyResponseRepository, SurveyResponseRow,
};
use suave_types::{normalize_username, Question, QuestionnaireId, ResponseId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateQuestionnaireRequest {
    pub username: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub struct QuestionnaireBody {
    pub id: QuestionnaireId,
    pub username: String,
    pub questions: Vec<Question>,
}

impl From<QuestionnaireRow> for QuestionnaireBody {
    fn from(row: QuestionnaireRow) -> Self {
        Self {
            id: row.questionnaire_id(),
            username: row.username,
            questions: row.questions.0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitResponseRequest {
    pub name: String,
    pub email: String,
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SurveyResponseBody {
    pub id: ResponseId,
    pub questionnaire_id: QuestionnaireId,
    pub name: String,
    pub email: String,
    pub answers: Vec<String>,
    pub detail: &'static str,
}

impl From<SurveyResponseRow> for SurveyResponseBody {
    fn from(row: SurveyResponseRow) -> Self {
        Self {
            id: row.response_id(),
            questionnaire_id: QuestionnaireId(row.questionnaire_id),
            name: row.name,
            email: row.email,
            answers: row.answers.0,
            detail: "Your survey has been submitted",
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/questionnaire-service/v1/questionnaires
#[instrument(skip_all, fields(username = %req.username))]
pub async fn create_questionnaire(
    State(state): State<AppState>,
    Json(req): Json<CreateQuestionnaireRequest>,
) -> ApiResult<(StatusCode, Json<QuestionnaireBody>)> {
    if req.questions.is_empty() {
        return Err(ApiError::Validation(
            "The questionnaire must have at least 1 question".to_string(),
        ));
    }

    let username = normalize_username(&req.username)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let row = state
        .repos
        .questionnaires
        .create(CreateQuestionnaire {
            username,
            questions: req.questions,
        })
        .await?;

    tracing::info!(questionnaire_id = %row.questionnaire_id(), "questionnaire created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// GET /api/questionnaire-service/v1/questionnaires/{id}
#[instrument(skip(state))]
pub async fn get_questionnaire(
    State(state): State<AppState>,
    Path(id): Path<QuestionnaireId>,
) -> ApiResult<Json<QuestionnaireBody>> {
    let row = state
        .repos
        .questionnaires
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Questionnaire not found"))?;

    Ok(Json(row.into()))
}

/// POST /api/questionnaire-service/v1/questionnaires/{id}/responses
#[instrument(skip(state, req), fields(questionnaire_id = %id))]
pub async fn submit_response(
    State(state): State<AppState>,
    Path(id): Path<QuestionnaireId>,
    Json(req): Json<SubmitResponseRequest>,
) -> ApiResult<(StatusCode, Json<SurveyResponseBody>)> {
    let questionnaire = state
        .repos
        .questionnaires
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Questionnaire not found"))?;

    // Extra answers are tolerated; missing ones are not
    if req.answers.len() < questionnaire.questions.0.len() {
        return Err(ApiError::Validation(
            "Missing answers to some questions".to_string(),
        ));
    }

    let email =
        normalize_username(&req.email).map_err(|e| ApiError::Validation(e.to_string()))?;

    let row = state
        .repos
        .responses
        .create(CreateSurveyResponse {
            questionnaire_id: id,
            name: req.name,
            email,
            answers: req.answers,
        })
        .await?;

    tracing::info!(response_id = %row.response_id(), "survey response recorded");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// GET /api/questionnaire-service/v1/questionnaires/{id}/responses
#[instrument(skip(state))]
pub async fn list_responses(
    State(state): State<AppState>,
    Path(id): Path<QuestionnaireId>,
) -> ApiResult<Json<Vec<SurveyResponseBody>>> {
    state
        .repos
        .questionnaires
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Questionnaire not found"))?;

    let rows = state.repos.responses.find_by_questionnaire(id).await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> Question {
        Question {
            text: text.to_string(),
            options: vec!["yes".to_string(), "no".to_string()],
            free: false,
            option: None,
        }
    }

    #[test]
    fn test_questionnaire_body_from_row() {
        let row = QuestionnaireRow {
            id: 7,
            username: "author@example.com".to_string(),
            questions: sqlx::types::Json(vec![question("Coffee or tea?")]),
            created_at: chrono::Utc::now(),
        };
        let body = QuestionnaireBody::from(row);
        assert_eq!(body.id, QuestionnaireId(7));
        assert_eq!(body.questions.len(), 1);
        assert_eq!(body.questions[0].text, "Coffee or tea?");
    }

    #[test]
    fn test_questionnaire_id_serializes_as_plain_number() {
        let row = QuestionnaireRow {
            id: 7,
            username: "author@example.com".to_string(),
            questions: sqlx::types::Json(vec![question("Coffee or tea?")]),
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(QuestionnaireBody::from(row)).unwrap();
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_survey_response_body_carries_submission_detail() {
        let row = SurveyResponseRow {
            id: 3,
            questionnaire_id: 7,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            answers: sqlx::types::Json(vec!["yes".to_string()]),
            created_at: chrono::Utc::now(),
        };
        let body = SurveyResponseBody::from(row);
        assert_eq!(body.detail, "Your survey has been submitted");
        assert_eq!(body.id, ResponseId(3));
        assert_eq!(body.questionnaire_id, QuestionnaireId(7));
    }
}
