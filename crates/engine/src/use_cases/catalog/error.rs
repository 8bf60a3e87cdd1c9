//! Catalog operation errors.

use poderes_domain::DomainError;

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while managing catalog entries.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
