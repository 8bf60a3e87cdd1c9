//! Create modification base use case.

use std::sync::Arc;

use poderes_domain::{ConfigurationOption, DomainError, ModificationBase};

use crate::infrastructure::ports::ModificationBaseRepo;

use super::error::CatalogError;

/// Everything needed to register a modification base
#[derive(Debug, Clone)]
pub struct CreateModificationBaseInput {
    pub name: String,
    pub description: String,
    /// PdA delta per grade; negative for flaws.
    pub cost_per_grade: f64,
    /// PdA delta applied once; negative for flaws.
    pub fixed_cost: i32,
    pub configurations: Vec<ConfigurationOption>,
    /// User-created entries carry the custom tag.
    pub custom: bool,
}

/// Create modification base use case.
pub struct CreateModificationBase {
    modification_repo: Arc<dyn ModificationBaseRepo>,
}

impl CreateModificationBase {
    pub fn new(modification_repo: Arc<dyn ModificationBaseRepo>) -> Self {
        Self { modification_repo }
    }

    /// Execute the create modification base use case.
    pub async fn execute(
        &self,
        input: CreateModificationBaseInput,
    ) -> Result<ModificationBase, CatalogError> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("Modification base name cannot be empty").into());
        }

        let mut base = if input.custom {
            ModificationBase::custom(input.name.trim(), input.cost_per_grade)
        } else {
            ModificationBase::new(input.name.trim(), input.cost_per_grade)
        };
        base = base
            .with_description(input.description)
            .with_fixed_cost(input.fixed_cost);
        for option in input.configurations {
            base = base.with_configuration(option);
        }

        self.modification_repo.create(&base).await?;

        tracing::info!(
            modification_base_id = %base.id,
            name = %base.name,
            custom = base.is_custom,
            "Modification base created"
        );

        Ok(base)
    }
}
