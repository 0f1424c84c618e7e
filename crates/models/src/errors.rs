use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => ModelError::Conflict(msg),
            _ => ModelError::Db(e.to_string()),
        }
    }
}

/// Minimum length (in characters) of a queue name or reservation contact name.
pub const MIN_NAME_LEN: usize = 8;
/// Minimum length (in characters) of a reservation phone number.
pub const MIN_PHONE_LEN: usize = 9;

pub(crate) fn check_min_len(field: &str, value: &str, min: usize) -> Result<(), ModelError> {
    if value.is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    if value.chars().count() < min {
        return Err(ModelError::Validation(format!("{field} must be at least {min} characters")));
    }
    Ok(())
}
