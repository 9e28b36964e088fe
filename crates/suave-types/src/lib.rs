//! Suave Types - Shared domain types
//!
//! This crate contains domain types used across Suave services:
//! - User identity and account names
//! - Bearer token envelope
//! - Questionnaire and survey response shapes

pub mod questionnaire;
pub mod token;
pub mod user;
pub mod username;

pub use questionnaire::*;
pub use token::*;
pub use user::*;
pub use username::*;
