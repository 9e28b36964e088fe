//! Bearer token envelope

use serde::{Deserialize, Serialize};

/// Access token response body, OAuth2 bearer style
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BearerToken {
    /// Signed compact JWT
    pub access_token: String,
    /// Always `"Bearer"`
    pub token_type: String,
}

impl BearerToken {
    /// Wrap a signed token in the bearer envelope
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
        }
    }
}
