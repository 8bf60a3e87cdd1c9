//! Get power use case.

use std::sync::Arc;

use poderes_domain::{Power, PowerId};

use crate::infrastructure::ports::PowerRepo;

use super::error::PowerError;

/// Fetch a single power by id.
pub struct GetPower {
    power_repo: Arc<dyn PowerRepo>,
}

impl GetPower {
    pub fn new(power_repo: Arc<dyn PowerRepo>) -> Self {
        Self { power_repo }
    }

    pub async fn execute(&self, power_id: PowerId) -> Result<Power, PowerError> {
        self.power_repo
            .get(power_id)
            .await?
            .ok_or(PowerError::PowerNotFound(power_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockPowerRepo;

    #[tokio::test]
    async fn when_power_missing_returns_not_found() {
        let mut power_repo = MockPowerRepo::new();
        power_repo.expect_get().returning(|_| Ok(None));

        let result = GetPower::new(Arc::new(power_repo))
            .execute(PowerId::new())
            .await;
        assert!(matches!(result, Err(PowerError::PowerNotFound(_))));
    }
}
