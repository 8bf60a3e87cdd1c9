//! Update power use case.
//!
//! Applies partial changes through the aggregate's copy-on-write
//! mutators. Whenever the composition changes (effects, global
//! modifications or parameters), the cost is recomputed through the
//! aggregator before persisting; a catalog miss during recomputation
//! propagates as the same typed not-found as on creation.

use std::sync::Arc;

use poderes_domain::{
    AlternativeCost, Description, Domain, EventDispatcher, ModificationScope, Note, Power,
    PowerId, PowerName, PowerParameters,
};

use crate::infrastructure::ports::{EffectBaseRepo, ModificationBaseRepo, PowerRepo};

use super::composition::{
    applied_effects, applied_modification, apply_power_floor, load_catalog, price_composition,
};
use super::error::PowerError;
use super::types::{EffectInput, ModificationInput};

/// Partial update: absent fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct UpdatePowerInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub domain: Option<Domain>,
    pub parameters: Option<PowerParameters>,
    pub effects: Option<Vec<EffectInput>>,
    pub global_modifications: Option<Vec<ModificationInput>>,
    /// `Some(None)` clears the alternative cost.
    pub alternative_cost: Option<Option<AlternativeCost>>,
    /// `Some(None)` clears the notes.
    pub notes: Option<Option<String>>,
}

/// Update power use case.
pub struct UpdatePower {
    power_repo: Arc<dyn PowerRepo>,
    effect_repo: Arc<dyn EffectBaseRepo>,
    modification_repo: Arc<dyn ModificationBaseRepo>,
    dispatcher: Arc<EventDispatcher>,
}

impl UpdatePower {
    pub fn new(
        power_repo: Arc<dyn PowerRepo>,
        effect_repo: Arc<dyn EffectBaseRepo>,
        modification_repo: Arc<dyn ModificationBaseRepo>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            power_repo,
            effect_repo,
            modification_repo,
            dispatcher,
        }
    }

    /// Execute the update power use case.
    pub async fn execute(
        &self,
        power_id: PowerId,
        input: UpdatePowerInput,
    ) -> Result<Power, PowerError> {
        let mut power = self
            .power_repo
            .get(power_id)
            .await?
            .ok_or(PowerError::PowerNotFound(power_id))?;

        if let Some(name) = input.name {
            power = power.update_name(PowerName::new(name)?);
        }
        if let Some(description) = input.description {
            power = power.update_description(Description::new(description)?);
        }
        if let Some(domain) = input.domain {
            power = power.update_domain(domain);
        }
        if let Some(alternative_cost) = input.alternative_cost {
            power = power.update_alternative_cost(alternative_cost);
        }
        if let Some(notes) = input.notes {
            power = power.update_notes(notes.map(Note::new).transpose()?);
        }

        let composition_changed = input.effects.is_some()
            || input.global_modifications.is_some()
            || input.parameters.is_some();

        if let Some(effect_inputs) = input.effects {
            power = power.update_effects(applied_effects(&effect_inputs)?)?;
        }
        if let Some(global_inputs) = input.global_modifications {
            let mut globals = Vec::with_capacity(global_inputs.len());
            for modification in &global_inputs {
                globals.push(applied_modification(modification, ModificationScope::Global)?);
            }
            power = power.update_global_modifications(globals)?;
        }
        if let Some(parameters) = input.parameters {
            power = power.update_parameters(parameters);
        }

        if composition_changed {
            let snapshot = load_catalog(
                self.effect_repo.as_ref(),
                self.modification_repo.as_ref(),
                power.effects(),
                power.global_modifications(),
            )
            .await?;
            let catalog = snapshot.catalog();

            let parameters = power.parameters();
            let (stamped, total) = price_composition(
                power.effects(),
                power.global_modifications(),
                &parameters,
                &catalog,
            )?;
            power = power.update_effects(stamped)?;
            power = power.with_total_cost(apply_power_floor(total));
        }

        self.power_repo.update(&power).await?;

        self.dispatcher.flush(&mut power);
        power.commit_changes();

        tracing::info!(
            power_id = %power.id(),
            pda = power.total_cost().pda(),
            "Power updated"
        );

        Ok(power)
    }
}
