//! Delete power use case.

use std::sync::Arc;

use poderes_domain::PowerId;

use crate::infrastructure::ports::PowerRepo;

use super::error::PowerError;

/// Delete a power. Destruction is a repository concern, not a domain one.
pub struct DeletePower {
    power_repo: Arc<dyn PowerRepo>,
}

impl DeletePower {
    pub fn new(power_repo: Arc<dyn PowerRepo>) -> Self {
        Self { power_repo }
    }

    pub async fn execute(&self, power_id: PowerId) -> Result<(), PowerError> {
        // Existence check keeps the error channel typed.
        self.power_repo
            .get(power_id)
            .await?
            .ok_or(PowerError::PowerNotFound(power_id))?;
        self.power_repo.delete(power_id).await?;

        tracing::info!(power_id = %power_id, "Power deleted");
        Ok(())
    }
}
