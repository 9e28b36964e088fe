//! HTTP handlers

mod auth;
mod health;

pub use auth::{me, refresh_token, sign_in, sign_out, sign_up};
pub use health::{health, ready};
