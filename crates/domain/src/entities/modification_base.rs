//! Modification base - catalog template for extras and flaws
//!
//! A modification shifts an effect's (or a whole power's) cost: extras
//! have positive deltas, flaws negative ones. Like effect bases, these
//! are read-only at evaluation time and "custom" is just a tag.

use serde::{Deserialize, Serialize};

use crate::entities::effect_base::ConfigurationOption;
use crate::ids::ModificationBaseId;

/// A catalog modification template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationBase {
    pub id: ModificationBaseId,
    pub name: String,
    pub description: String,
    /// PdA delta per grade of the applied modification; negative for flaws.
    #[serde(default)]
    pub cost_per_grade: f64,
    /// PdA delta applied once, after grade scaling; negative for flaws.
    #[serde(default)]
    pub fixed_cost: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configurations: Vec<ConfigurationOption>,
    /// Whether this entry was created by a user rather than the catalog.
    #[serde(default)]
    pub is_custom: bool,
}

impl ModificationBase {
    pub fn new(name: impl Into<String>, cost_per_grade: f64) -> Self {
        Self {
            id: ModificationBaseId::new(),
            name: name.into(),
            description: String::new(),
            cost_per_grade,
            fixed_cost: 0,
            configurations: Vec::new(),
            is_custom: false,
        }
    }

    /// A user-created modification base.
    pub fn custom(name: impl Into<String>, cost_per_grade: f64) -> Self {
        let mut base = Self::new(name, cost_per_grade);
        base.is_custom = true;
        base
    }

    pub fn with_id(mut self, id: ModificationBaseId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_fixed_cost(mut self, fixed_cost: i32) -> Self {
        self.fixed_cost = fixed_cost;
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
