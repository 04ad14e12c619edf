use sqlx::{Error as SqlxError, error::ErrorKind};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl RepositoryError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RepositoryError::Validation(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::Conflict(_))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, RepositoryError::Store(_))
    }
}

// Driver errors are rendered to text here so no sqlx type crosses the boundary.
impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::RowNotFound => RepositoryError::NotFound,
            SqlxError::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    RepositoryError::Conflict(format!("duplicate key: {}", db_err.message()))
                }
                ErrorKind::CheckViolation => RepositoryError::Conflict(format!(
                    "constraint rejected the change: {}",
                    db_err.message()
                )),
                _ => RepositoryError::Store(format!("database error: {}", db_err.message())),
            },
            SqlxError::PoolTimedOut => {
                RepositoryError::Store("timed out waiting for a pooled connection".to_string())
            }
            SqlxError::PoolClosed => {
                RepositoryError::Store("connection pool is closed".to_string())
            }
            other => RepositoryError::Store(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for RepositoryError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let reason = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{field}: {reason}")
                })
            })
            .collect();

        messages.sort();
        RepositoryError::Validation(messages)
    }
}
