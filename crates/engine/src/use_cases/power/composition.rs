//! Shared composition assembly and pricing for the power use cases.
//!
//! Create and Update both walk the same path: turn plain inputs into
//! domain values, resolve every catalog reference (any miss aborts with
//! the typed not-found before anything is written), run the cost
//! aggregator, and apply the power-level floor of 1 PdA that `PowerCost`
//! itself knows nothing about.

use std::collections::HashMap;

use poderes_domain::{
    rules, AppliedEffect, AppliedModification, Catalog, EffectBase, EffectBaseId,
    ModificationBase, ModificationBaseId, ModificationScope, Note, PowerCost, PowerParameters,
};

use crate::infrastructure::ports::{EffectBaseRepo, ModificationBaseRepo};

use super::error::PowerError;
use super::types::{EffectInput, ModificationInput};

/// Catalog snapshot the pricing runs against.
pub(crate) struct CatalogSnapshot {
    effects: HashMap<EffectBaseId, EffectBase>,
    modifications: HashMap<ModificationBaseId, ModificationBase>,
}

impl CatalogSnapshot {
    pub(crate) fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.effects, &self.modifications)
    }
}

/// Build an applied modification from its plain input.
pub(crate) fn applied_modification(
    input: &ModificationInput,
    scope: ModificationScope,
) -> Result<AppliedModification, PowerError> {
    let mut modification = AppliedModification::new(input.modification_base_id, scope)
        .with_grade(input.grade)
        .map_err(PowerError::Validation)?;
    for (key, value) in &input.parameters {
        modification = modification.with_parameter(key.clone(), value.clone());
    }
    if let Some(note) = &input.note {
        modification = modification.with_note(Note::new(note.clone())?);
    }
    Ok(modification)
}

/// Build the applied effects of a composition from their plain inputs.
pub(crate) fn applied_effects(inputs: &[EffectInput]) -> Result<Vec<AppliedEffect>, PowerError> {
    let mut effects = Vec::with_capacity(inputs.len());
    for input in inputs {
        let mut effect = AppliedEffect::new(input.effect_base_id, input.grade)?;
        if let Some(configuration_id) = &input.configuration_id {
            effect = effect.with_configuration(configuration_id.clone());
        }
        if let Some(input_value) = &input.input_value {
            effect = effect.with_input_value(input_value.clone());
        }
        if let Some(note) = &input.note {
            effect = effect.with_note(Note::new(note.clone())?);
        }
        let mut modifications = Vec::with_capacity(input.modifications.len());
        for modification in &input.modifications {
            modifications.push(applied_modification(modification, ModificationScope::Local)?);
        }
        effect = effect.with_modifications(modifications)?;
        effects.push(effect);
    }
    Ok(effects)
}

/// Resolve every catalog reference of a composition.
///
/// Any unresolved id aborts with the typed not-found so callers never
/// perform a partial write.
pub(crate) async fn load_catalog(
    effect_repo: &dyn EffectBaseRepo,
    modification_repo: &dyn ModificationBaseRepo,
    effects: &[AppliedEffect],
    globals: &[AppliedModification],
) -> Result<CatalogSnapshot, PowerError> {
    let mut snapshot = CatalogSnapshot {
        effects: HashMap::new(),
        modifications: HashMap::new(),
    };

    for effect in effects {
        let id = effect.effect_base_id();
        if !snapshot.effects.contains_key(&id) {
            let base = effect_repo
                .get(id)
                .await?
                .ok_or(PowerError::EffectNotFound(id))?;
            snapshot.effects.insert(id, base);
        }
        for modification in effect.modifications() {
            let id = modification.modification_base_id();
            if !snapshot.modifications.contains_key(&id) {
                let base = modification_repo
                    .get(id)
                    .await?
                    .ok_or(PowerError::ModificationNotFound(id))?;
                snapshot.modifications.insert(id, base);
            }
        }
    }
    for modification in globals {
        let id = modification.modification_base_id();
        if !snapshot.modifications.contains_key(&id) {
            let base = modification_repo
                .get(id)
                .await?
                .ok_or(PowerError::ModificationNotFound(id))?;
            snapshot.modifications.insert(id, base);
        }
    }

    Ok(snapshot)
}

/// Pick the power's parameters: the explicit override when supplied, else
/// the worst case across the effects' defaults ("pior parâmetro").
pub(crate) fn resolve_parameters(
    override_parameters: Option<PowerParameters>,
    effects: &[AppliedEffect],
    catalog: &Catalog<'_>,
) -> Result<PowerParameters, PowerError> {
    if let Some(parameters) = override_parameters {
        return Ok(parameters);
    }
    Ok(rules::derive_parameters(effects, catalog)?.unwrap_or_default())
}

/// Price a composition: stamp each effect's cost contribution and return
/// the power total (before the floor).
pub(crate) fn price_composition(
    effects: &[AppliedEffect],
    globals: &[AppliedModification],
    parameters: &PowerParameters,
    catalog: &Catalog<'_>,
) -> Result<(Vec<AppliedEffect>, PowerCost), PowerError> {
    let global_per_grade = rules::global_per_grade_delta(globals, catalog)?;

    let mut stamped = Vec::with_capacity(effects.len());
    for effect in effects {
        let cost = rules::effect_cost(effect, parameters, catalog, global_per_grade)?;
        stamped.push(effect.with_cost(cost));
    }

    let total = rules::power_cost(effects, globals, parameters, catalog)?;
    Ok((stamped, total))
}

/// A power always costs at least 1 PdA, however many flaws it stacks.
pub(crate) fn apply_power_floor(cost: PowerCost) -> PowerCost {
    if cost.pda() == 0 {
        PowerCost::clamped(1, i64::from(cost.pe()), i64::from(cost.espacos()))
    } else {
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_lifts_zero_pda_to_one() {
        let floored = apply_power_floor(PowerCost::clamped(0, 3, 1));
        assert_eq!(floored.pda(), 1);
        assert_eq!(floored.pe(), 3);

        let untouched = apply_power_floor(PowerCost::clamped(7, 0, 0));
        assert_eq!(untouched.pda(), 7);
    }
}
