//! Effect base - catalog template an applied effect instantiates
//!
//! Effect bases come from the static catalog or are created by users
//! ("custom" is a tag, not a subtype). They are read-only at evaluation
//! time: the cost aggregator only ever borrows them.

use serde::{Deserialize, Serialize};

use crate::ids::EffectBaseId;
use crate::value_objects::PowerParameters;

/// A selectable variant of an effect or modification base
///
/// Selecting an option shifts the cost: `cost_modifier` joins the
/// per-grade cost, `fixed_cost_modifier` is added once after grade
/// scaling. Options gated by `minimum_grade` contribute nothing below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationOption {
    pub id: String,
    pub name: String,
    /// Added to the per-grade PdA cost when selected.
    #[serde(default)]
    pub cost_modifier: f64,
    /// Added once to the final PdA cost when selected.
    #[serde(default)]
    pub fixed_cost_modifier: i32,
    /// Option unavailable below this grade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_grade: Option<u8>,
}

impl ConfigurationOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost_modifier: 0.0,
            fixed_cost_modifier: 0,
            minimum_grade: None,
        }
    }

    pub fn with_cost_modifier(mut self, per_grade: f64) -> Self {
        self.cost_modifier = per_grade;
        self
    }

    pub fn with_fixed_cost_modifier(mut self, fixed: i32) -> Self {
        self.fixed_cost_modifier = fixed;
        self
    }

    pub fn with_minimum_grade(mut self, grade: u8) -> Self {
        self.minimum_grade = Some(grade);
        self
    }

    /// Whether the option's grade gate is satisfied.
    pub fn available_at(&self, grade: u8) -> bool {
        self.minimum_grade.is_none_or(|min| grade >= min)
    }
}

/// Input the player must supply when applying an effect
/// (e.g. the damage descriptor of an attack effect)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRequirement {
    pub label: String,
    pub required: bool,
}

/// A catalog effect template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectBase {
    pub id: EffectBaseId,
    pub name: String,
    pub description: String,
    /// PdA per grade, before modifications.
    pub base_cost: f64,
    /// Flat PE contribution to any power using this effect.
    #[serde(default)]
    pub pe_cost: u32,
    /// Flat espaços contribution.
    #[serde(default)]
    pub espaco_cost: u32,
    /// Parameters the effect manifests with unless the power overrides them.
    #[serde(default)]
    pub default_parameters: PowerParameters,
    /// Input the player must fill in when applying the effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputRequirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configurations: Vec<ConfigurationOption>,
    /// Whether this entry was created by a user rather than the catalog.
    #[serde(default)]
    pub is_custom: bool,
}

impl EffectBase {
    pub fn new(name: impl Into<String>, base_cost: f64) -> Self {
        Self {
            id: EffectBaseId::new(),
            name: name.into(),
            description: String::new(),
            base_cost,
            pe_cost: 0,
            espaco_cost: 0,
            default_parameters: PowerParameters::default(),
            input: None,
            configurations: Vec::new(),
            is_custom: false,
        }
    }

    /// A user-created effect base.
    pub fn custom(name: impl Into<String>, base_cost: f64) -> Self {
        let mut base = Self::new(name, base_cost);
        base.is_custom = true;
        base
    }

    pub fn with_id(mut self, id: EffectBaseId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_pe_cost(mut self, pe_cost: u32) -> Self {
        self.pe_cost = pe_cost;
        self
    }

    pub fn with_espaco_cost(mut self, espaco_cost: u32) -> Self {
        self.espaco_cost = espaco_cost;
        self
    }

    pub fn with_default_parameters(mut self, parameters: PowerParameters) -> Self {
        self.default_parameters = parameters;
        self
    }

    pub fn with_input(mut self, label: impl Into<String>, required: bool) -> Self {
        self.input = Some(InputRequirement {
            label: label.into(),
            required,
        });
        self
    }

    pub fn with_configuration(mut self, option: ConfigurationOption) -> Self {
        self.configurations.push(option);
        self
    }

    /// Look up a configuration option by id.
    pub fn configuration(&self, id: &str) -> Option<&ConfigurationOption> {
        self.configurations.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_factory_sets_tag() {
        let base = EffectBase::new("Dano", 1.0);
        assert!(!base.is_custom);

        let custom = EffectBase::custom("Dano Psíquico", 2.0);
        assert!(custom.is_custom);
    }

    #[test]
    fn configuration_lookup_by_id() {
        let base = EffectBase::new("Dano", 1.0)
            .with_configuration(ConfigurationOption::new("em-area", "Em Área").with_cost_modifier(1.0));

        assert!(base.configuration("em-area").is_some());
        assert!(base.configuration("missing").is_none());
    }

    #[test]
    fn minimum_grade_gates_availability() {
        let option = ConfigurationOption::new("brutal", "Brutal").with_minimum_grade(5);
        assert!(!option.available_at(4));
        assert!(option.available_at(5));

        let ungated = ConfigurationOption::new("leve", "Leve");
        assert!(ungated.available_at(1));
    }
}
