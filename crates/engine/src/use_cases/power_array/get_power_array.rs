//! Get power array use case.

use std::sync::Arc;

use poderes_domain::{PowerArray, PowerArrayId};

use crate::infrastructure::ports::PowerArrayRepo;

use super::error::PowerArrayError;

/// Fetch a single array by id.
pub struct GetPowerArray {
    array_repo: Arc<dyn PowerArrayRepo>,
}

impl GetPowerArray {
    pub fn new(array_repo: Arc<dyn PowerArrayRepo>) -> Self {
        Self { array_repo }
    }

    pub async fn execute(&self, array_id: PowerArrayId) -> Result<PowerArray, PowerArrayError> {
        self.array_repo
            .get(array_id)
            .await?
            .ok_or(PowerArrayError::ArrayNotFound(array_id))
    }
}
