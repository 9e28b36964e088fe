//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// A unique constraint rejected the write
    #[error("unique constraint violated")]
    UniqueViolation,
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::UniqueViolation;
            }
        }
        Self::Sqlx(err)
    }
}

/// Database result type
pub type DbResult<T> = Result<T, DbError>;
