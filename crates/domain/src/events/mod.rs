//! Domain Events
//!
//! Coarse-grained events representing significant state changes in the
//! domain. Aggregate mutators queue them on the instance; the dispatcher
//! drains them only after the surrounding unit of work persists
//! successfully (two-phase commit).

pub mod dispatcher;

pub use dispatcher::{EventDispatcher, EventSource};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::{EffectBaseId, ModificationBaseId, PowerArrayId, PowerId};

/// Domain event for significant state changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DomainEvent {
    // Power lifecycle
    PowerCreated {
        power_id: PowerId,
        name: String,
    },
    PowerUpdated {
        power_id: PowerId,
    },
    EffectAdded {
        power_id: PowerId,
        effect_base_id: EffectBaseId,
    },
    EffectRemoved {
        power_id: PowerId,
        effect_base_id: EffectBaseId,
    },
    GlobalModificationAdded {
        power_id: PowerId,
        modification_base_id: ModificationBaseId,
    },
    GlobalModificationRemoved {
        power_id: PowerId,
        modification_base_id: ModificationBaseId,
    },

    // Power array lifecycle
    PowerArrayCreated {
        array_id: PowerArrayId,
        name: String,
    },
    PowerArrayUpdated {
        array_id: PowerArrayId,
    },
    PowerAddedToArray {
        array_id: PowerArrayId,
        power_id: PowerId,
    },
    PowerRemovedFromArray {
        array_id: PowerArrayId,
        power_id: PowerId,
    },
}

impl DomainEvent {
    /// Identity of the aggregate that queued this event.
    pub fn aggregate_id(&self) -> Uuid {
        match self {
            Self::PowerCreated { power_id, .. }
            | Self::PowerUpdated { power_id }
            | Self::EffectAdded { power_id, .. }
            | Self::EffectRemoved { power_id, .. }
            | Self::GlobalModificationAdded { power_id, .. }
            | Self::GlobalModificationRemoved { power_id, .. } => power_id.to_uuid(),
            Self::PowerArrayCreated { array_id, .. }
            | Self::PowerArrayUpdated { array_id }
            | Self::PowerAddedToArray { array_id, .. }
            | Self::PowerRemovedFromArray { array_id, .. } => array_id.to_uuid(),
        }
    }
}
