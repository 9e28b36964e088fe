//! Account name normalization
//!
//! Usernames are email addresses. Services normalize them once at the edge
//! so lookups, uniqueness, and cache keys all agree on a single spelling.

use thiserror::Error;

/// Longest accepted address, per RFC 5321 limits
const MAX_USERNAME_LENGTH: usize = 254;

/// Error for a username that is not a plausible email address
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid username: {0}")]
pub struct InvalidUsername(pub String);

/// Normalize an email-shaped username: trim surrounding whitespace and
/// lowercase it. Returns an error when the result is not shaped like
/// `local@domain.tld`.
pub fn normalize_username(raw: &str) -> Result<String, InvalidUsername> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_USERNAME_LENGTH {
        return Err(InvalidUsername("length out of range".into()));
    }
    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(InvalidUsername("contains whitespace".into()));
    }

    let (local, domain) = trimmed
        .split_once('@')
        .ok_or_else(|| InvalidUsername("missing @".into()))?;
    if local.is_empty() || domain.contains('@') {
        return Err(InvalidUsername("malformed local part".into()));
    }
    // the domain needs an interior dot, not one at either edge
    let dot = domain.find('.');
    match dot {
        Some(i) if i > 0 && i < domain.len() - 1 => {}
        _ => return Err(InvalidUsername("malformed domain".into())),
    }
    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return Err(InvalidUsername("malformed domain".into()));
    }

    Ok(trimmed.to_lowercase())
}
