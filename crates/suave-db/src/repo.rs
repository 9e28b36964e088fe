//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use suave_types::{Question, QuestionnaireId};
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// Questionnaire repository trait
#[async_trait]
pub trait QuestionnaireRepository: Send + Sync {
    /// Find a questionnaire by ID
    async fn find_by_id(&self, id: QuestionnaireId) -> DbResult<Option<QuestionnaireRow>>;

    /// Create a new questionnaire
    async fn create(&self, questionnaire: CreateQuestionnaire) -> DbResult<QuestionnaireRow>;
}

/// Create questionnaire input
#[derive(Debug, Clone)]
pub struct CreateQuestionnaire {
    pub username: String,
    pub questions: Vec<Question>,
}

/// Survey response repository trait
#[async_trait]
pub trait SurveyResponseRepository: Send + Sync {
    /// Find all responses submitted for a questionnaire
    async fn find_by_questionnaire(
        &self,
        questionnaire_id: QuestionnaireId,
    ) -> DbResult<Vec<SurveyResponseRow>>;

    /// Record a new survey response
    async fn create(&self, response: CreateSurveyResponse) -> DbResult<SurveyResponseRow>;
}

/// Create survey response input
#[derive(Debug, Clone)]
pub struct CreateSurveyResponse {
    pub questionnaire_id: QuestionnaireId,
    pub name: String,
    pub email: String,
    pub answers: Vec<String>,
}
