//! Create effect base use case.
//!
//! Catalog entries normally ship with the static tables; this path exists
//! for user-created entries, which are the same entity with the custom
//! tag set.

use std::sync::Arc;

use poderes_domain::{ConfigurationOption, DomainError, EffectBase, PowerParameters};

use crate::infrastructure::ports::EffectBaseRepo;

use super::error::CatalogError;

/// Everything needed to register an effect base
#[derive(Debug, Clone)]
pub struct CreateEffectBaseInput {
    pub name: String,
    pub description: String,
    /// PdA per grade.
    pub base_cost: f64,
    pub pe_cost: u32,
    pub espaco_cost: u32,
    pub default_parameters: Option<PowerParameters>,
    pub configurations: Vec<ConfigurationOption>,
    /// User-created entries carry the custom tag.
    pub custom: bool,
}

/// Create effect base use case.
pub struct CreateEffectBase {
    effect_repo: Arc<dyn EffectBaseRepo>,
}

impl CreateEffectBase {
    pub fn new(effect_repo: Arc<dyn EffectBaseRepo>) -> Self {
        Self { effect_repo }
    }

    /// Execute the create effect base use case.
    pub async fn execute(&self, input: CreateEffectBaseInput) -> Result<EffectBase, CatalogError> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("Effect base name cannot be empty").into());
        }

        let mut base = if input.custom {
            EffectBase::custom(input.name.trim(), input.base_cost)
        } else {
            EffectBase::new(input.name.trim(), input.base_cost)
        };
        base = base
            .with_description(input.description)
            .with_pe_cost(input.pe_cost)
            .with_espaco_cost(input.espaco_cost);
        if let Some(parameters) = input.default_parameters {
            base = base.with_default_parameters(parameters);
        }
        for option in input.configurations {
            base = base.with_configuration(option);
        }

        self.effect_repo.create(&base).await?;

        tracing::info!(
            effect_base_id = %base.id,
            name = %base.name,
            custom = base.is_custom,
            "Effect base created"
        );

        Ok(base)
    }
}
