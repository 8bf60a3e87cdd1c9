//! List powers use case.

use std::sync::Arc;

use poderes_domain::Power;

use crate::infrastructure::ports::{Page, PowerRepo};

use super::error::PowerError;

/// Paginated power listing (20 items per page, stable order).
pub struct ListPowers {
    power_repo: Arc<dyn PowerRepo>,
}

impl ListPowers {
    pub fn new(power_repo: Arc<dyn PowerRepo>) -> Self {
        Self { power_repo }
    }

    pub async fn execute(&self, page: Page) -> Result<Vec<Power>, PowerError> {
        Ok(self.power_repo.list(page).await?)
    }
}
