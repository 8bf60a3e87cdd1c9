//! Delete power array use case.

use std::sync::Arc;

use poderes_domain::PowerArrayId;

use crate::infrastructure::ports::PowerArrayRepo;

use super::error::PowerArrayError;

/// Delete an array. Member powers are standalone aggregates and survive.
pub struct DeletePowerArray {
    array_repo: Arc<dyn PowerArrayRepo>,
}

impl DeletePowerArray {
    pub fn new(array_repo: Arc<dyn PowerArrayRepo>) -> Self {
        Self { array_repo }
    }

    pub async fn execute(&self, array_id: PowerArrayId) -> Result<(), PowerArrayError> {
        self.array_repo
            .get(array_id)
            .await?
            .ok_or(PowerArrayError::ArrayNotFound(array_id))?;
        self.array_repo.delete(array_id).await?;

        tracing::info!(array_id = %array_id, "Power array deleted");
        Ok(())
    }
}
