//! PostgreSQL repository implementations

mod questionnaire;
mod survey_response;
mod user;

pub use questionnaire::PgQuestionnaireRepository;
pub use survey_response::PgSurveyResponseRepository;
pub use user::PgUserRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub questionnaires: PgQuestionnaireRepository,
    pub responses: PgSurveyResponseRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            questionnaires: PgQuestionnaireRepository::new(pool.clone()),
            responses: PgSurveyResponseRepository::new(pool),
        }
    }
}
