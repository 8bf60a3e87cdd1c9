//! Power operation errors.

use poderes_domain::{CostError, DomainError, EffectBaseId, ModificationBaseId, PowerId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during power operations.
///
/// The not-found variants are the typed failure channel of the use
/// cases; validation and invariant errors surface unconverted.
#[derive(Debug, thiserror::Error)]
pub enum PowerError {
    #[error("Effect base not found: {0}")]
    EffectNotFound(EffectBaseId),
    #[error("Modification base not found: {0}")]
    ModificationNotFound(ModificationBaseId),
    #[error("Power not found: {0}")]
    PowerNotFound(PowerId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<CostError> for PowerError {
    fn from(err: CostError) -> Self {
        match err {
            CostError::EffectBaseNotFound(id) => Self::EffectNotFound(id),
            CostError::ModificationBaseNotFound(id) => Self::ModificationNotFound(id),
        }
    }
}
