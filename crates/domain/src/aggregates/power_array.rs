//! Power array ("acervo") aggregate - a themed group of powers
//!
//! An array binds powers that share a domain (the "descritor" of the
//! group). The aggregate's `total_cost` is the plain field-wise sum of
//! its members; the stricter themed pricing (principal + 1 PdA per extra
//! member) is a separate named rule in `rules::array_cost` and is never
//! applied implicitly here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::aggregates::Power;
use crate::common::WatchedList;
use crate::error::DomainError;
use crate::events::{DomainEvent, EventSource};
use crate::ids::PowerArrayId;
use crate::value_objects::{ArrayName, Description, Domain, Note, PowerCost, PowerParameters};

/// Most powers an array may group
pub const MAX_POWERS: usize = 50;

/// How the members of an array relate at play time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerArrayKind {
    /// Members stack; all can be active together.
    Normal,
    /// Only one member active at a time.
    Alternado,
    /// Members share a pool and can be partially active.
    Dinamico,
}

fn power_identity(a: &Power, b: &Power) -> bool {
    a.id() == b.id()
}

/// A themed group of powers sharing a domain
///
/// # Invariants
///
/// - 1 to 50 powers; removing the last power is rejected
/// - every member's domain structurally equals the array's domain
#[derive(Debug, Clone)]
pub struct PowerArray {
    // Identity
    id: PowerArrayId,

    // Core attributes (newtypes)
    name: ArrayName,
    description: Description,
    domain: Domain,

    // Optional shared manifestation baseline
    base_parameters: Option<PowerParameters>,

    // Members (change-tracked)
    powers: WatchedList<Power>,

    kind: PowerArrayKind,

    // Generic field-wise sum of member costs
    total_cost: PowerCost,

    notes: Option<Note>,

    // Timestamps
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,

    // Queued domain events, drained by the dispatcher after commit
    events: Vec<DomainEvent>,
}

impl PowerArray {
    // =========================================================================
    // Factory
    // =========================================================================

    /// Create a new array, validating every invariant before returning.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the member count is out of
    /// range or any member's domain differs from the array's.
    pub fn create(
        name: ArrayName,
        description: Description,
        domain: Domain,
        kind: PowerArrayKind,
        powers: Vec<Power>,
        total_cost: PowerCost,
    ) -> Result<Self, DomainError> {
        let id = PowerArrayId::new();
        let array = Self {
            id,
            name: name.clone(),
            description,
            domain,
            base_parameters: None,
            powers: WatchedList::new(powers, power_identity),
            kind,
            total_cost,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
            events: vec![DomainEvent::PowerArrayCreated {
                array_id: id,
                name: name.as_str().to_string(),
            }],
        };
        array.validate()?;
        Ok(array)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.powers.is_empty() {
            return Err(DomainError::validation(
                "An array must group at least one power",
            ));
        }
        if self.powers.len() > MAX_POWERS {
            return Err(DomainError::validation(format!(
                "An array cannot group more than {} powers",
                MAX_POWERS
            )));
        }
        for power in self.powers.items() {
            if power.domain() != &self.domain {
                return Err(DomainError::validation(format!(
                    "Power '{}' belongs to domain {} but the array is {}",
                    power.name(),
                    power.domain(),
                    self.domain
                )));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> PowerArrayId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &ArrayName {
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
    pub fn base_parameters(&self) -> Option<PowerParameters> {
        self.base_parameters
    }

    /// The member powers, in display order.
    #[inline]
    pub fn powers(&self) -> &[Power] {
        self.powers.items()
    }

    #[inline]
    pub fn kind(&self) -> PowerArrayKind {
        self.kind
    }

    #[inline]
    pub fn total_cost(&self) -> PowerCost {
        self.total_cost
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

    pub fn added_powers(&self) -> Vec<&Power> {
        self.powers.added()
    }

    pub fn removed_powers(&self) -> Vec<&Power> {
        self.powers.removed()
    }

    pub fn has_uncommitted_changes(&self) -> bool {
        self.powers.has_changes()
    }

    /// Adopt the current membership as the committed snapshot.
    pub fn commit_changes(&mut self) {
        self.powers.commit();
    }

    // =========================================================================
    // Builder methods (for construction)
    // =========================================================================

    /// Set the id (used when loading from storage or in tests).
    pub fn with_id(mut self, id: PowerArrayId) -> Self {
        let old = self.id;
        self.id = id;
        for event in &mut self.events {
            rekey(event, old, id);
        }
        self
    }

    pub fn with_base_parameters(mut self, parameters: PowerParameters) -> Self {
        self.base_parameters = Some(parameters);
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
    pub fn update_name(&self, name: ArrayName) -> Self {
        let mut copy = self.touched();
        copy.name = name;
        copy.events
            .push(DomainEvent::PowerArrayUpdated { array_id: copy.id });
        copy
    }

    /// Returns a copy with a new description.
    pub fn update_description(&self, description: Description) -> Self {
        let mut copy = self.touched();
        copy.description = description;
        copy.events
            .push(DomainEvent::PowerArrayUpdated { array_id: copy.id });
        copy
    }

    /// Returns a copy of a different kind.
    pub fn update_kind(&self, kind: PowerArrayKind) -> Self {
        let mut copy = self.touched();
        copy.kind = kind;
        copy.events
            .push(DomainEvent::PowerArrayUpdated { array_id: copy.id });
        copy
    }

    /// Returns a copy with different base parameters.
    pub fn update_base_parameters(&self, parameters: Option<PowerParameters>) -> Self {
        let mut copy = self.touched();
        copy.base_parameters = parameters;
        copy.events
            .push(DomainEvent::PowerArrayUpdated { array_id: copy.id });
        copy
    }

    /// Returns a copy with new notes.
    pub fn update_notes(&self, notes: Option<Note>) -> Self {
        let mut copy = self.touched();
        copy.notes = notes;
        copy.events
            .push(DomainEvent::PowerArrayUpdated { array_id: copy.id });
        copy
    }

    /// Returns a copy with the recomputed total cost stamped on.
    pub fn with_total_cost(&self, total_cost: PowerCost) -> Self {
        let mut copy = self.touched();
        copy.total_cost = total_cost;
        copy
    }

    /// Returns a copy with one more member.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the member cap is hit or
    /// the power's domain differs from the array's.
    pub fn add_power(&self, power: Power) -> Result<Self, DomainError> {
        let mut copy = self.touched();
        copy.events.push(DomainEvent::PowerAddedToArray {
            array_id: copy.id,
            power_id: power.id(),
        });
        copy.powers.add(power);
        copy.validate()?;
        Ok(copy)
    }

    /// Returns a copy without the member at `index`.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if `index` is out of range
    /// - `DomainError::Constraint` if it would remove the last power
    pub fn remove_power(&self, index: usize) -> Result<Self, DomainError> {
        if index >= self.powers.len() {
            return Err(DomainError::validation(format!(
                "No power at index {}",
                index
            )));
        }
        if self.powers.len() == 1 {
            return Err(DomainError::constraint(
                "An array must keep at least one power",
            ));
        }
        let mut copy = self.touched();
        if let Some(removed) = copy.powers.remove_at(index) {
            copy.events.push(DomainEvent::PowerRemovedFromArray {
                array_id: copy.id,
                power_id: removed.id(),
            });
        }
        copy.validate()?;
        Ok(copy)
    }

    /// Returns a copy with the whole membership replaced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the list is empty, over the
    /// cap, or domain-mismatched.
    pub fn update_powers(&self, powers: Vec<Power>) -> Result<Self, DomainError> {
        let mut copy = self.touched();
        copy.powers.update(powers);
        copy.events
            .push(DomainEvent::PowerArrayUpdated { array_id: copy.id });
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

fn rekey(event: &mut DomainEvent, old: PowerArrayId, new: PowerArrayId) {
    match event {
        DomainEvent::PowerArrayCreated { array_id, .. }
        | DomainEvent::PowerArrayUpdated { array_id }
        | DomainEvent::PowerAddedToArray { array_id, .. }
        | DomainEvent::PowerRemovedFromArray { array_id, .. } => {
            if *array_id == old {
                *array_id = new;
            }
        }
        _ => {}
    }
}

impl EventSource for PowerArray {
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

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PowerArrayWireFormat {
    id: PowerArrayId,
    name: ArrayName,
    description: Description,
    domain: Domain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_parameters: Option<PowerParameters>,
    powers: Vec<Power>,
    kind: PowerArrayKind,
    total_cost: PowerCost,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<Note>,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Serialize for PowerArray {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = PowerArrayWireFormat {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            domain: self.domain.clone(),
            base_parameters: self.base_parameters,
            powers: self.powers.items().to_vec(),
            kind: self.kind,
            total_cost: self.total_cost,
            notes: self.notes.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PowerArray {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = PowerArrayWireFormat::deserialize(deserializer)?;
        let array = PowerArray {
            id: wire.id,
            name: wire.name,
            description: wire.description,
            domain: wire.domain,
            base_parameters: wire.base_parameters,
            powers: WatchedList::new(wire.powers, power_identity),
            kind: wire.kind,
            total_cost: wire.total_cost,
            notes: wire.notes,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            events: Vec::new(),
        };
        array.validate().map_err(serde::de::Error::custom)?;
        Ok(array)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AppliedEffect;
    use crate::ids::EffectBaseId;
    use crate::value_objects::{DomainName, PowerName};

    fn test_power(domain: Domain, pda: u32) -> Power {
        Power::create(
            PowerName::new("Membro").unwrap(),
            Description::new("Um poder do acervo").unwrap(),
            domain,
            PowerParameters::default(),
            vec![AppliedEffect::new(EffectBaseId::new(), 1).unwrap()],
            Vec::new(),
            PowerCost::new(pda, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn arcano() -> Domain {
        Domain::new(DomainName::Arcano).unwrap()
    }

    fn test_array() -> PowerArray {
        PowerArray::create(
            ArrayName::new("Arsenal Arcano").unwrap(),
            Description::new("Truques de batalha").unwrap(),
            arcano(),
            PowerArrayKind::Normal,
            vec![test_power(arcano(), 10)],
            PowerCost::new(10, 0, 0).unwrap(),
        )
        .unwrap()
    }

    mod factory {
        use super::*;

        #[test]
        fn create_queues_the_creation_event() {
            let mut array = test_array();
            let events = array.take_events();
            assert!(matches!(
                events.as_slice(),
                [DomainEvent::PowerArrayCreated { .. }]
            ));
        }

        #[test]
        fn create_rejects_cross_domain_members() {
            let result = PowerArray::create(
                ArrayName::new("Misto").unwrap(),
                Description::new("Domínios misturados").unwrap(),
                arcano(),
                PowerArrayKind::Normal,
                vec![
                    test_power(arcano(), 10),
                    test_power(Domain::new(DomainName::Natural).unwrap(), 5),
                ],
                PowerCost::new(15, 0, 0).unwrap(),
            );
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn create_rejects_empty_membership() {
            let result = PowerArray::create(
                ArrayName::new("Vazio").unwrap(),
                Description::new("Sem poderes").unwrap(),
                arcano(),
                PowerArrayKind::Normal,
                Vec::new(),
                PowerCost::zero(),
            );
            assert!(result.is_err());
        }

        #[test]
        fn domain_comparison_is_structural() {
            // same name, different knowledge areas -> different domains
            let quimica = Domain::cientifico("Química").unwrap();
            let fisica = Domain::cientifico("Física").unwrap();
            let result = PowerArray::create(
                ArrayName::new("Laboratório").unwrap(),
                Description::new("Ciência aplicada").unwrap(),
                quimica,
                PowerArrayKind::Normal,
                vec![test_power(fisica, 10)],
                PowerCost::new(10, 0, 0).unwrap(),
            );
            assert!(result.is_err());
        }
    }

    mod mutation {
        use super::*;

        #[test]
        fn add_power_enforces_domain_match() {
            let array = test_array();
            let stranger = test_power(Domain::new(DomainName::Sombrio).unwrap(), 5);
            assert!(array.add_power(stranger).is_err());
            assert_eq!(array.powers().len(), 1);
        }

        #[test]
        fn removing_the_last_power_fails_and_leaves_array_unchanged() {
            let array = test_array();
            let result = array.remove_power(0);
            assert!(matches!(result, Err(DomainError::Constraint(_))));
            assert_eq!(array.powers().len(), 1);
        }

        #[test]
        fn remove_power_validates_index() {
            let array = test_array().add_power(test_power(arcano(), 5)).unwrap();
            assert!(array.remove_power(9).is_err());
            let trimmed = array.remove_power(1).unwrap();
            assert_eq!(trimmed.powers().len(), 1);
        }

        #[test]
        fn update_kind_is_copy_on_write() {
            let array = test_array();
            let alternated = array.update_kind(PowerArrayKind::Alternado);
            assert_eq!(alternated.kind(), PowerArrayKind::Alternado);
            assert_eq!(array.kind(), PowerArrayKind::Normal);
        }
    }

    mod serde_format {
        use super::*;

        #[test]
        fn roundtrip_preserves_membership() {
            let array = test_array();
            let json = serde_json::to_string(&array).unwrap();
            let back: PowerArray = serde_json::from_str(&json).unwrap();

            assert_eq!(back.id(), array.id());
            assert_eq!(back.powers().len(), 1);
            assert_eq!(back.kind(), PowerArrayKind::Normal);
        }
    }
}
