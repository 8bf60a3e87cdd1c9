//! A modification applied to an effect or to a whole power.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ModificationBaseId;
use crate::value_objects::Note;

/// Parameter-bag key selecting a configuration option on the base
pub const CONFIGURATION_PARAM: &str = "configuracao";

/// Whether a modification alters one effect or the whole power
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModificationScope {
    Global,
    Local,
}

/// An instance of a catalog modification, applied at some grade
///
/// Value object: equality is structural. The parameter bag is opaque to
/// the domain except for the configuration-selection key, which the cost
/// aggregator reads.
///
/// # Invariants
///
/// - `grade >= 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedModification {
    modification_base_id: ModificationBaseId,
    scope: ModificationScope,
    grade: u8,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    parameters: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<Note>,
}

impl AppliedModification {
    /// Apply a catalog modification at grade 1.
    pub fn new(modification_base_id: ModificationBaseId, scope: ModificationScope) -> Self {
        Self {
            modification_base_id,
            scope,
            grade: 1,
            parameters: BTreeMap::new(),
            note: None,
        }
    }

    /// Returns a copy at a different grade.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `grade` is zero.
    pub fn with_grade(&self, grade: u8) -> Result<Self, DomainError> {
        if grade == 0 {
            return Err(DomainError::validation(
                "Modification grade must be at least 1",
            ));
        }
        let mut copy = self.clone();
        copy.grade = grade;
        Ok(copy)
    }

    /// Returns a copy with an extra parameter entry.
    pub fn with_parameter(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.parameters.insert(key.into(), value.into());
        copy
    }

    /// Returns a copy selecting a configuration option on the base.
    pub fn with_configuration(&self, configuration_id: impl Into<String>) -> Self {
        self.with_parameter(CONFIGURATION_PARAM, configuration_id)
    }

    /// Returns a copy with a note attached.
    pub fn with_note(&self, note: Note) -> Self {
        let mut copy = self.clone();
        copy.note = Some(note);
        copy
    }

    #[inline]
    pub fn modification_base_id(&self) -> ModificationBaseId {
        self.modification_base_id
    }

    #[inline]
    pub fn scope(&self) -> ModificationScope {
        self.scope
    }

    #[inline]
    pub fn grade(&self) -> u8 {
        self.grade
    }

    #[inline]
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    #[inline]
    pub fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    /// The configuration option this instance selects, if any.
    pub fn selected_configuration(&self) -> Option<&str> {
        self.parameters.get(CONFIGURATION_PARAM).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_grade_one() {
        let m = AppliedModification::new(ModificationBaseId::new(), ModificationScope::Local);
        assert_eq!(m.grade(), 1);
        assert!(m.parameters().is_empty());
    }

    #[test]
    fn grade_must_be_positive() {
        let m = AppliedModification::new(ModificationBaseId::new(), ModificationScope::Global);
        assert!(m.with_grade(0).is_err());
        assert_eq!(m.with_grade(3).unwrap().grade(), 3);
        // original untouched
        assert_eq!(m.grade(), 1);
    }

    #[test]
    fn configuration_selection_reads_parameter_bag() {
        let m = AppliedModification::new(ModificationBaseId::new(), ModificationScope::Local);
        assert!(m.selected_configuration().is_none());

        let m = m.with_configuration("em-area");
        assert_eq!(m.selected_configuration(), Some("em-area"));
    }

    #[test]
    fn equality_is_structural() {
        let id = ModificationBaseId::new();
        let a = AppliedModification::new(id, ModificationScope::Local).with_parameter("x", "1");
        let b = AppliedModification::new(id, ModificationScope::Local).with_parameter("x", "1");
        assert_eq!(a, b);
        assert_ne!(a, b.with_parameter("x", "2"));
    }
}
