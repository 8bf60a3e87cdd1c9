//! Power array operation errors.

use poderes_domain::{DomainError, PowerArrayId, PowerId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during power array operations.
#[derive(Debug, thiserror::Error)]
pub enum PowerArrayError {
    #[error("Power array not found: {0}")]
    ArrayNotFound(PowerArrayId),
    #[error("Power not found: {0}")]
    PowerNotFound(PowerId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
