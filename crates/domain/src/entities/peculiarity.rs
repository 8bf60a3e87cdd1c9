//! Peculiarity - user-owned catalog entry backing the Peculiar domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PeculiarityId, UserId};

/// A user-defined peculiarity that powers of the Peculiar domain reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peculiarity {
    pub id: PeculiarityId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Peculiarity {
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: PeculiarityId::new(),
            user_id,
            name: name.into(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: PeculiarityId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
