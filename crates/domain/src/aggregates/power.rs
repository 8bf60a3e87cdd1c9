//! Power aggregate - a composition of effects bought with points
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: all state is encapsulated
//! - **Newtypes**: `PowerName`, `Description`, `Note` for validated strings
//! - **Valid by construction**: `create()` validates every invariant
//! - **Copy-on-write mutators**: every mutation validates, builds a new
//!   instance with a refreshed `updated_at` and queues its domain event;
//!   the receiver is never modified, so a failed mutation leaves the
//!   original untouched

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::common::WatchedList;
use crate::entities::AppliedEffect;
use crate::error::DomainError;
use crate::events::{DomainEvent, EventSource};
use crate::ids::PowerId;
use crate::value_objects::{
    AlternativeCost, AppliedModification, Description, Domain, Note, PowerCost, PowerName,
    PowerParameters,
};

/// Most effects a power may compose
pub const MAX_EFFECTS: usize = 20;

/// Most global modifications a power may carry
pub const MAX_GLOBAL_MODIFICATIONS: usize = 50;

fn effect_identity(a: &AppliedEffect, b: &AppliedEffect) -> bool {
    a.id() == b.id()
}

fn modification_equality(a: &AppliedModification, b: &AppliedModification) -> bool {
    a == b
}

/// A custom power composed from catalog effects and modifications
///
/// # Invariants
///
/// - 1 to 20 effects; removing the last effect is rejected
/// - 0 to 50 global modifications
///
/// `total_cost` is never recomputed implicitly: use cases run the cost
/// aggregator and stamp the result via [`Power::with_total_cost`] whenever
/// effects, modifications or parameters change.
#[derive(Debug, Clone)]
pub struct Power {
    // Identity
    id: PowerId,

    // Core attributes (newtypes)
    name: PowerName,
    description: Description,
    domain: Domain,

    // Manifestation
    parameters: PowerParameters,

    // Composition (change-tracked)
    effects: WatchedList<AppliedEffect>,
    global_modifications: WatchedList<AppliedModification>,

    // Costs
    total_cost: PowerCost,
    alternative_cost: Option<AlternativeCost>,

    // Flags and notes
    is_custom: bool,
    notes: Option<Note>,

    // Timestamps
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,

    // Queued domain events, drained by the dispatcher after commit
    events: Vec<DomainEvent>,
}

impl Power {
    // =========================================================================
    // Factory
    // =========================================================================

    /// Create a new power, validating every invariant before returning.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the effect or modification
    /// counts are out of range.
    pub fn create(
        name: PowerName,
        description: Description,
        domain: Domain,
        parameters: PowerParameters,
        effects: Vec<AppliedEffect>,
        global_modifications: Vec<AppliedModification>,
        total_cost: PowerCost,
    ) -> Result<Self, DomainError> {
        let id = PowerId::new();
        let power = Self {
            id,
            name: name.clone(),
            description,
            domain,
            parameters,
            effects: WatchedList::new(effects, effect_identity),
            global_modifications: WatchedList::new(global_modifications, modification_equality),
            total_cost,
            alternative_cost: None,
            is_custom: false,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
            events: vec![DomainEvent::PowerCreated {
                power_id: id,
                name: name.as_str().to_string(),
            }],
        };
        power.validate()?;
        Ok(power)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.effects.is_empty() {
            return Err(DomainError::validation(
                "A power must compose at least one effect",
            ));
        }
        if self.effects.len() > MAX_EFFECTS {
            return Err(DomainError::validation(format!(
                "A power cannot compose more than {} effects",
                MAX_EFFECTS
            )));
        }
        if self.global_modifications.len() > MAX_GLOBAL_MODIFICATIONS {
            return Err(DomainError::validation(format!(
                "A power cannot carry more than {} global modifications",
                MAX_GLOBAL_MODIFICATIONS
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> PowerId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &PowerName {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &Description {
        &self.description
    }

    #[inline]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    #[inline]
    pub fn parameters(&self) -> PowerParameters {
        self.parameters
    }

    /// The composed effects, in display order.
    #[inline]
    pub fn effects(&self) -> &[AppliedEffect] {
        self.effects.items()
    }

    /// The global modifications, in display order.
    #[inline]
    pub fn global_modifications(&self) -> &[AppliedModification] {
        self.global_modifications.items()
    }

    #[inline]
    pub fn total_cost(&self) -> PowerCost {
        self.total_cost
    }

    #[inline]
    pub fn alternative_cost(&self) -> Option<&AlternativeCost> {
        self.alternative_cost.as_ref()
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    #[inline]
    pub fn notes(&self) -> Option<&Note> {
        self.notes.as_ref()
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    // =========================================================================
    // Change tracking
    // =========================================================================

    /// Effects added since the last commit.
    pub fn added_effects(&self) -> Vec<&AppliedEffect> {
        self.effects.added()
    }

    /// Effects removed since the last commit.
    pub fn removed_effects(&self) -> Vec<&AppliedEffect> {
        self.effects.removed()
    }

    pub fn has_uncommitted_changes(&self) -> bool {
        self.effects.has_changes() || self.global_modifications.has_changes()
    }

    /// Adopt the current composition as the committed snapshot. Called by
    /// use cases after the surrounding persistence succeeds.
    pub fn commit_changes(&mut self) {
        self.effects.commit();
        self.global_modifications.commit();
    }

    // =========================================================================
    // Builder methods (for construction)
    // =========================================================================

    /// Set the id (used when loading from storage or in tests).
    pub fn with_id(mut self, id: PowerId) -> Self {
        let old = self.id;
        self.id = id;
        for event in &mut self.events {
            rekey(event, old, id);
        }
        self
    }

    pub fn with_alternative_cost(mut self, alternative_cost: AlternativeCost) -> Self {
        self.alternative_cost = Some(alternative_cost);
        self
    }

    pub fn with_custom(mut self, is_custom: bool) -> Self {
        self.is_custom = is_custom;
        self
    }

    pub fn with_notes(mut self, notes: Note) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    // =========================================================================
    // Copy-on-write mutators
    // =========================================================================

    /// Returns a copy with a new name.
    pub fn update_name(&self, name: PowerName) -> Self {
        let mut copy = self.touched();
        copy.name = name;
        copy.events.push(DomainEvent::PowerUpdated { power_id: copy.id });
        copy
    }

    /// Returns a copy with a new description.
    pub fn update_description(&self, description: Description) -> Self {
        let mut copy = self.touched();
        copy.description = description;
        copy.events.push(DomainEvent::PowerUpdated { power_id: copy.id });
        copy
    }

    /// Returns a copy in a different domain.
    pub fn update_domain(&self, domain: Domain) -> Self {
        let mut copy = self.touched();
        copy.domain = domain;
        copy.events.push(DomainEvent::PowerUpdated { power_id: copy.id });
        copy
    }

    /// Returns a copy with different manifestation parameters.
    pub fn update_parameters(&self, parameters: PowerParameters) -> Self {
        let mut copy = self.touched();
        copy.parameters = parameters;
        copy.events.push(DomainEvent::PowerUpdated { power_id: copy.id });
        copy
    }

    /// Returns a copy with new notes.
    pub fn update_notes(&self, notes: Option<Note>) -> Self {
        let mut copy = self.touched();
        copy.notes = notes;
        copy.events.push(DomainEvent::PowerUpdated { power_id: copy.id });
        copy
    }

    /// Returns a copy with a different alternative cost.
    pub fn update_alternative_cost(&self, alternative_cost: Option<AlternativeCost>) -> Self {
        let mut copy = self.touched();
        copy.alternative_cost = alternative_cost;
        copy.events.push(DomainEvent::PowerUpdated { power_id: copy.id });
        copy
    }

    /// Returns a copy with the recomputed total cost stamped on. Queues
    /// no event: cost recomputation always accompanies another mutation.
    pub fn with_total_cost(&self, total_cost: PowerCost) -> Self {
        let mut copy = self.touched();
        copy.total_cost = total_cost;
        copy
    }

    /// Returns a copy with one more effect.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the effect cap is hit.
    pub fn add_effect(&self, effect: AppliedEffect) -> Result<Self, DomainError> {
        let mut copy = self.touched();
        copy.events.push(DomainEvent::EffectAdded {
            power_id: copy.id,
            effect_base_id: effect.effect_base_id(),
        });
        copy.effects.add(effect);
        copy.validate()?;
        Ok(copy)
    }

    /// Returns a copy without the effect at `index`.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if `index` is out of range
    /// - `DomainError::Constraint` if it would remove the last effect
    pub fn remove_effect(&self, index: usize) -> Result<Self, DomainError> {
        if index >= self.effects.len() {
            return Err(DomainError::validation(format!(
                "No effect at index {}",
                index
            )));
        }
        if self.effects.len() == 1 {
            return Err(DomainError::constraint(
                "A power must keep at least one effect",
            ));
        }
        let mut copy = self.touched();
        if let Some(removed) = copy.effects.remove_at(index) {
            copy.events.push(DomainEvent::EffectRemoved {
                power_id: copy.id,
                effect_base_id: removed.effect_base_id(),
            });
        }
        copy.validate()?;
        Ok(copy)
    }

    /// Returns a copy with the whole effect list replaced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the list is empty or over
    /// the cap.
    pub fn update_effects(&self, effects: Vec<AppliedEffect>) -> Result<Self, DomainError> {
        let mut copy = self.touched();
        copy.effects.update(effects);
        copy.events.push(DomainEvent::PowerUpdated { power_id: copy.id });
        copy.validate()?;
        Ok(copy)
    }

    /// Returns a copy with one more global modification.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the modification cap is hit.
    pub fn add_global_modification(
        &self,
        modification: AppliedModification,
    ) -> Result<Self, DomainError> {
        let mut copy = self.touched();
        copy.events.push(DomainEvent::GlobalModificationAdded {
            power_id: copy.id,
            modification_base_id: modification.modification_base_id(),
        });
        copy.global_modifications.add(modification);
        copy.validate()?;
        Ok(copy)
    }

    /// Returns a copy without the global modification at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is out of range.
    pub fn remove_global_modification(&self, index: usize) -> Result<Self, DomainError> {
        if index >= self.global_modifications.len() {
            return Err(DomainError::validation(format!(
                "No global modification at index {}",
                index
            )));
        }
        let mut copy = self.touched();
        if let Some(removed) = copy.global_modifications.remove_at(index) {
            copy.events.push(DomainEvent::GlobalModificationRemoved {
                power_id: copy.id,
                modification_base_id: removed.modification_base_id(),
            });
        }
        copy.validate()?;
        Ok(copy)
    }

    /// Returns a copy with the whole global modification list replaced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the list is over the cap.
    pub fn update_global_modifications(
        &self,
        modifications: Vec<AppliedModification>,
    ) -> Result<Self, DomainError> {
        let mut copy = self.touched();
        copy.global_modifications.update(modifications);
        copy.events.push(DomainEvent::PowerUpdated { power_id: copy.id });
        copy.validate()?;
        Ok(copy)
    }

    /// Clone with a refreshed `updated_at`.
    fn touched(&self) -> Self {
        let mut copy = self.clone();
        copy.updated_at = Some(Utc::now());
        copy
    }
}

fn rekey(event: &mut DomainEvent, old: PowerId, new: PowerId) {
    match event {
        DomainEvent::PowerCreated { power_id, .. }
        | DomainEvent::PowerUpdated { power_id }
        | DomainEvent::EffectAdded { power_id, .. }
        | DomainEvent::EffectRemoved { power_id, .. }
        | DomainEvent::GlobalModificationAdded { power_id, .. }
        | DomainEvent::GlobalModificationRemoved { power_id, .. } => {
            if *power_id == old {
                *power_id = new;
            }
        }
        _ => {}
    }
}

impl EventSource for Power {
    fn aggregate_id(&self) -> Uuid {
        self.id.to_uuid()
    }

    fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Intermediate format matching the wire shape; pending events and
/// change-tracking snapshots never serialize.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PowerWireFormat {
    id: PowerId,
    name: PowerName,
    description: Description,
    domain: Domain,
    parameters: PowerParameters,
    effects: Vec<AppliedEffect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    global_modifications: Vec<AppliedModification>,
    total_cost: PowerCost,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alternative_cost: Option<AlternativeCost>,
    #[serde(default)]
    is_custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<Note>,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Serialize for Power {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = PowerWireFormat {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            domain: self.domain.clone(),
            parameters: self.parameters,
            effects: self.effects.items().to_vec(),
            global_modifications: self.global_modifications.items().to_vec(),
            total_cost: self.total_cost,
            alternative_cost: self.alternative_cost.clone(),
            is_custom: self.is_custom,
            notes: self.notes.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Power {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = PowerWireFormat::deserialize(deserializer)?;
        let power = Power {
            id: wire.id,
            name: wire.name,
            description: wire.description,
            domain: wire.domain,
            parameters: wire.parameters,
            effects: WatchedList::new(wire.effects, effect_identity),
            global_modifications: WatchedList::new(
                wire.global_modifications,
                modification_equality,
            ),
            total_cost: wire.total_cost,
            alternative_cost: wire.alternative_cost,
            is_custom: wire.is_custom,
            notes: wire.notes,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            events: Vec::new(),
        };
        power.validate().map_err(serde::de::Error::custom)?;
        Ok(power)
    }
}

// ============================================================================
// Tests
// ============================================================================
