//! Applied effect - an instance of a catalog effect inside a power
//!
//! Identity-carrying entity (watched lists track it by id). All mutators
//! are copy-on-write: they take `&self`, validate, and return a new
//! instance; a failed mutation leaves the receiver untouched.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;
use crate::ids::{AppliedEffectId, EffectBaseId, ModificationBaseId};
use crate::value_objects::{AppliedModification, Note, PowerCost};

/// Lowest legal effect grade
pub const MIN_GRADE: u8 = 1;

/// Highest legal effect grade
pub const MAX_GRADE: u8 = 30;

/// Most local modifications a single effect may carry
pub const MAX_MODIFICATIONS: usize = 50;

/// A catalog effect applied at some grade, with its local modifications
///
/// # Invariants
///
/// - `grade` in `[1, 30]`, re-checked on every mutation
/// - at most 50 local modifications
///
/// The stored `cost` is this effect's contribution to the power total.
/// Mutators never recompute it; callers run the cost aggregator and stamp
/// the result via [`AppliedEffect::with_cost`].
#[derive(Debug, Clone)]
pub struct AppliedEffect {
    id: AppliedEffectId,
    effect_base_id: EffectBaseId,
    grade: u8,
    configuration_id: Option<String>,
    input_value: Option<String>,
    modifications: Vec<AppliedModification>,
    cost: PowerCost,
    note: Option<Note>,
}

impl AppliedEffect {
    /// Apply a catalog effect at the given grade, with zero cost.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the grade is out of bounds.
    pub fn new(effect_base_id: EffectBaseId, grade: u8) -> Result<Self, DomainError> {
        check_grade(grade)?;
        Ok(Self {
            id: AppliedEffectId::new(),
            effect_base_id,
            grade,
            configuration_id: None,
            input_value: None,
            modifications: Vec::new(),
            cost: PowerCost::zero(),
            note: None,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> AppliedEffectId {
        self.id
    }

    #[inline]
    pub fn effect_base_id(&self) -> EffectBaseId {
        self.effect_base_id
    }

    #[inline]
    pub fn grade(&self) -> u8 {
        self.grade
    }

    #[inline]
    pub fn configuration_id(&self) -> Option<&str> {
        self.configuration_id.as_deref()
    }

    #[inline]
    pub fn input_value(&self) -> Option<&str> {
        self.input_value.as_deref()
    }

    #[inline]
    pub fn modifications(&self) -> &[AppliedModification] {
        &self.modifications
    }

    #[inline]
    pub fn cost(&self) -> PowerCost {
        self.cost
    }

    #[inline]
    pub fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    // =========================================================================
    // Builder methods (for construction)
    // =========================================================================

    /// Set the id (used when loading from storage).
    pub fn with_id(mut self, id: AppliedEffectId) -> Self {
        self.id = id;
        self
    }

    pub fn with_configuration(mut self, configuration_id: impl Into<String>) -> Self {
        self.configuration_id = Some(configuration_id.into());
        self
    }

    pub fn with_input_value(mut self, input_value: impl Into<String>) -> Self {
        self.input_value = Some(input_value.into());
        self
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.note = Some(note);
        self
    }

    /// Stamp the computed cost contribution onto this effect.
    pub fn with_cost(&self, cost: PowerCost) -> Self {
        let mut copy = self.clone();
        copy.cost = cost;
        copy
    }

    // =========================================================================
    // Copy-on-write mutators
    // =========================================================================

    /// Returns a copy at a different grade.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the grade is out of bounds.
    pub fn with_grade(&self, grade: u8) -> Result<Self, DomainError> {
        check_grade(grade)?;
        let mut copy = self.clone();
        copy.grade = grade;
        Ok(copy)
    }

    /// Returns a copy with one more local modification.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` when the modification cap is hit.
    pub fn add_modification(
        &self,
        modification: AppliedModification,
    ) -> Result<Self, DomainError> {
        if self.modifications.len() >= MAX_MODIFICATIONS {
            return Err(DomainError::constraint(format!(
                "An effect cannot carry more than {} modifications",
                MAX_MODIFICATIONS
            )));
        }
        let mut copy = self.clone();
        copy.modifications.push(modification);
        Ok(copy)
    }

    /// Returns a copy without the first modification of the given base.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no such modification is applied.
    pub fn remove_modification(
        &self,
        modification_base_id: ModificationBaseId,
    ) -> Result<Self, DomainError> {
        let index = self
            .modifications
            .iter()
            .position(|m| m.modification_base_id() == modification_base_id)
            .ok_or_else(|| {
                DomainError::not_found("AppliedModification", modification_base_id.to_string())
            })?;
        let mut copy = self.clone();
        copy.modifications.remove(index);
        Ok(copy)
    }

    /// Returns a copy with the whole modification list replaced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` when the list exceeds the cap.
    pub fn with_modifications(
        &self,
        modifications: Vec<AppliedModification>,
    ) -> Result<Self, DomainError> {
        if modifications.len() > MAX_MODIFICATIONS {
            return Err(DomainError::constraint(format!(
                "An effect cannot carry more than {} modifications",
                MAX_MODIFICATIONS
            )));
        }
        let mut copy = self.clone();
        copy.modifications = modifications;
        Ok(copy)
    }
}

fn check_grade(grade: u8) -> Result<(), DomainError> {
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(DomainError::validation(format!(
            "Effect grade must be between {} and {}",
            MIN_GRADE, MAX_GRADE
        )));
    }
    Ok(())
}

// ============================================================================
// Serde Implementation
// ============================================================================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppliedEffectWire {
    id: AppliedEffectId,
    effect_base_id: EffectBaseId,
    grade: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    configuration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    input_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    modifications: Vec<AppliedModification>,
    cost: PowerCost,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<Note>,
}

impl Serialize for AppliedEffect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = AppliedEffectWire {
            id: self.id,
            effect_base_id: self.effect_base_id,
            grade: self.grade,
            configuration_id: self.configuration_id.clone(),
            input_value: self.input_value.clone(),
            modifications: self.modifications.clone(),
            cost: self.cost,
            note: self.note.clone(),
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AppliedEffect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = AppliedEffectWire::deserialize(deserializer)?;
        check_grade(wire.grade).map_err(serde::de::Error::custom)?;
        if wire.modifications.len() > MAX_MODIFICATIONS {
            return Err(serde::de::Error::custom(
                "An effect cannot carry more than 50 modifications",
            ));
        }
        Ok(AppliedEffect {
            id: wire.id,
            effect_base_id: wire.effect_base_id,
            grade: wire.grade,
            configuration_id: wire.configuration_id,
            input_value: wire.input_value,
            modifications: wire.modifications,
            cost: wire.cost,
            note: wire.note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::ModificationScope;

    fn test_effect() -> AppliedEffect {
        AppliedEffect::new(EffectBaseId::new(), 5).unwrap()
    }

    #[test]
    fn grade_bounds_enforced_on_construction() {
        assert!(AppliedEffect::new(EffectBaseId::new(), 0).is_err());
        assert!(AppliedEffect::new(EffectBaseId::new(), 31).is_err());
        assert!(AppliedEffect::new(EffectBaseId::new(), 1).is_ok());
        assert!(AppliedEffect::new(EffectBaseId::new(), 30).is_ok());
    }

    #[test]
    fn with_grade_is_copy_on_write() {
        let effect = test_effect();
        let raised = effect.with_grade(10).unwrap();

        assert_eq!(raised.grade(), 10);
        assert_eq!(effect.grade(), 5);
        // identity is preserved across mutation
        assert_eq!(raised.id(), effect.id());
    }

    #[test]
    fn with_grade_revalidates_bounds() {
        let effect = test_effect();
        assert!(effect.with_grade(0).is_err());
        assert!(effect.with_grade(31).is_err());
        assert_eq!(effect.grade(), 5);
    }

    #[test]
    fn add_and_remove_modification() {
        let base_id = ModificationBaseId::new();
        let effect = test_effect();
        let modified = effect
            .add_modification(AppliedModification::new(base_id, ModificationScope::Local))
            .unwrap();

        assert_eq!(modified.modifications().len(), 1);
        assert!(effect.modifications().is_empty());

        let removed = modified.remove_modification(base_id).unwrap();
        assert!(removed.modifications().is_empty());

        assert!(modified.remove_modification(ModificationBaseId::new()).is_err());
    }

    #[test]
    fn modification_cap_enforced() {
        let mut effect = test_effect();
        for _ in 0..MAX_MODIFICATIONS {
            effect = effect
                .add_modification(AppliedModification::new(
                    ModificationBaseId::new(),
                    ModificationScope::Local,
                ))
                .unwrap();
        }
        let overflow = effect.add_modification(AppliedModification::new(
            ModificationBaseId::new(),
            ModificationScope::Local,
        ));
        assert!(overflow.is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let effect = test_effect()
            .with_configuration("em-area")
            .with_input_value("fogo");
        let json = serde_json::to_string(&effect).unwrap();
        let back: AppliedEffect = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id(), effect.id());
        assert_eq!(back.grade(), effect.grade());
        assert_eq!(back.configuration_id(), Some("em-area"));
    }

    #[test]
    fn serde_rejects_out_of_range_grade() {
        let effect = test_effect();
        let json = serde_json::to_string(&effect).unwrap().replace("\"grade\":5", "\"grade\":40");
        let back: Result<AppliedEffect, _> = serde_json::from_str(&json);
        assert!(back.is_err());
    }
}
