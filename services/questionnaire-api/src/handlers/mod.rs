//! HTTP handlers

mod health;
mod questionnaire;

pub use health::{health, ready};
pub use questionnaire::{
    create_questionnaire, get_questionnaire, list_responses, submit_response,
};
