//! Password hashing with scrypt
//!
//! Stored credentials are PHC strings carrying algorithm, parameters,
//! and salt, so verification never needs configuration lookups. Supplied
//! passwords go through SASLprep first; two spellings of the same Unicode
//! password hash identically.

use scrypt::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use scrypt::{Params, Scrypt};

use crate::AuthError;

/// Scrypt credential hasher
///
/// Hashing runs tens of milliseconds by design; callers on async paths
/// should move it onto a blocking thread.
#[derive(Clone, Debug)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Create a hasher with the recommended scrypt parameters
    pub fn new() -> Self {
        Self {
            params: Params::recommended(),
        }
    }

    /// Create a hasher with custom scrypt parameters
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    /// Hash a password into a PHC string with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let prepared = prepare_password(password)?;
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(prepared.as_bytes(), None, None, self.params, &salt)
            .map_err(|e| AuthError::Internal(format!("password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored PHC string
    ///
    /// A wrong password is `Ok(false)`. An undecodable stored hash is an
    /// error: it means the credential store is corrupt, not that the
    /// caller guessed wrong.
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
        let prepared = prepare_password(password)?;
        let parsed = PasswordHash::new(stored).map_err(|e| {
            tracing::error!("Stored password hash is undecodable: {}", e);
            AuthError::Internal("stored credential is malformed".to_string())
        })?;

        match Scrypt.verify_password(prepared.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(scrypt::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::Internal(format!(
                "password verification failed: {e}"
            ))),
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// SASLprep the supplied password
fn prepare_password(password: &str) -> Result<String, AuthError> {
    stringprep::saslprep(password)
        .map(|cow| cow.into_owned())
        .map_err(|_| AuthError::InvalidInput("password contains prohibited characters".to_string()))
}
