//! Plain-data inputs for the power use cases.

use std::collections::BTreeMap;

use poderes_domain::{EffectBaseId, ModificationBaseId};

/// One effect of the power being composed
#[derive(Debug, Clone)]
pub struct EffectInput {
    pub effect_base_id: EffectBaseId,
    pub grade: u8,
    pub configuration_id: Option<String>,
    pub input_value: Option<String>,
    pub modifications: Vec<ModificationInput>,
    pub note: Option<String>,
}

impl EffectInput {
    pub fn new(effect_base_id: EffectBaseId, grade: u8) -> Self {
        Self {
            effect_base_id,
            grade,
            configuration_id: None,
            input_value: None,
            modifications: Vec::new(),
            note: None,
        }
    }

    pub fn with_modification(mut self, modification: ModificationInput) -> Self {
        self.modifications.push(modification);
        self
    }

    pub fn with_configuration(mut self, configuration_id: impl Into<String>) -> Self {
        self.configuration_id = Some(configuration_id.into());
        self
    }
}

/// One modification applied to an effect or to the whole power
#[derive(Debug, Clone)]
pub struct ModificationInput {
    pub modification_base_id: ModificationBaseId,
    pub grade: u8,
    pub parameters: BTreeMap<String, String>,
    pub note: Option<String>,
}

impl ModificationInput {
    pub fn new(modification_base_id: ModificationBaseId) -> Self {
        Self {
            modification_base_id,
            grade: 1,
            parameters: BTreeMap::new(),
            note: None,
        }
    }

    pub fn with_grade(mut self, grade: u8) -> Self {
        self.grade = grade;
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}
