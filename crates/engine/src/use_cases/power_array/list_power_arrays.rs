//! List power arrays use case.

use std::sync::Arc;

use poderes_domain::PowerArray;

use crate::infrastructure::ports::{Page, PowerArrayRepo};

use super::error::PowerArrayError;

/// Paginated array listing (20 items per page, stable order).
pub struct ListPowerArrays {
    array_repo: Arc<dyn PowerArrayRepo>,
}

impl ListPowerArrays {
    pub fn new(array_repo: Arc<dyn PowerArrayRepo>) -> Self {
        Self { array_repo }
    }

    pub async fn execute(&self, page: Page) -> Result<Vec<PowerArray>, PowerArrayError> {
        Ok(self.array_repo.list(page).await?)
    }
}
