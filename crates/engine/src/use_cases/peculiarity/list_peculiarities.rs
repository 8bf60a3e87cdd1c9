//! List peculiarities use case.

use std::sync::Arc;

use poderes_domain::{Peculiarity, UserId};

use crate::infrastructure::ports::{Page, PeculiarityRepo, RepoError};

/// Paginated listing of a user's peculiarities.
pub struct ListPeculiarities {
    peculiarity_repo: Arc<dyn PeculiarityRepo>,
}

impl ListPeculiarities {
    pub fn new(peculiarity_repo: Arc<dyn PeculiarityRepo>) -> Self {
        Self { peculiarity_repo }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Peculiarity>, RepoError> {
        self.peculiarity_repo.list_for_user(user_id, page).await
    }
}
