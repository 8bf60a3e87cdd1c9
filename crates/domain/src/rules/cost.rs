//! Cost aggregation for powers.
//!
//! Pure, synchronous computation over a read-only catalog view. An
//! unresolved effect or modification reference short-circuits the whole
//! aggregation; there are no partial totals.
//!
//! The power-level floor of 1 PdA is deliberately NOT applied here: a
//! `PowerCost` has no notion of "power", so the floor belongs to the use
//! cases that assemble one.

use std::collections::HashMap;

use thiserror::Error;

use crate::entities::{AppliedEffect, EffectBase, ModificationBase};
use crate::ids::{EffectBaseId, ModificationBaseId};
use crate::rules::parameter_scale::{modifier_for, most_restrictive, ParameterKind};
use crate::value_objects::{AppliedModification, PowerCost, PowerParameters};

/// Failure to resolve a catalog reference during aggregation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CostError {
    #[error("Effect base not found: {0}")]
    EffectBaseNotFound(EffectBaseId),

    #[error("Modification base not found: {0}")]
    ModificationBaseNotFound(ModificationBaseId),
}

/// Borrowed view over the catalog snapshot the aggregation runs against
///
/// The catalog is read-only during evaluation and owned by the caller.
pub struct Catalog<'a> {
    effects: &'a HashMap<EffectBaseId, EffectBase>,
    modifications: &'a HashMap<ModificationBaseId, ModificationBase>,
}

impl<'a> Catalog<'a> {
    pub fn new(
        effects: &'a HashMap<EffectBaseId, EffectBase>,
        modifications: &'a HashMap<ModificationBaseId, ModificationBase>,
    ) -> Self {
        Self {
            effects,
            modifications,
        }
    }

    fn effect_base(&self, id: EffectBaseId) -> Result<&'a EffectBase, CostError> {
        self.effects.get(&id).ok_or(CostError::EffectBaseNotFound(id))
    }

    fn modification_base(
        &self,
        id: ModificationBaseId,
    ) -> Result<&'a ModificationBase, CostError> {
        self.modifications
            .get(&id)
            .ok_or(CostError::ModificationBaseNotFound(id))
    }
}

/// Per-grade PdA delta of one applied modification, configuration
/// included, scaled by the modification's own grade.
fn modification_per_grade(modification: &AppliedModification, base: &ModificationBase) -> f64 {
    let mut per_grade = base.cost_per_grade;
    if let Some(option) = modification
        .selected_configuration()
        .and_then(|id| base.configuration(id))
    {
        if option.available_at(modification.grade()) {
            per_grade += option.cost_modifier;
        }
    }
    per_grade * f64::from(modification.grade())
}

/// Fixed PdA delta of one applied modification, configuration included.
fn modification_fixed(modification: &AppliedModification, base: &ModificationBase) -> i64 {
    let mut fixed = i64::from(base.fixed_cost);
    if let Some(option) = modification
        .selected_configuration()
        .and_then(|id| base.configuration(id))
    {
        if option.available_at(modification.grade()) {
            fixed += i64::from(option.fixed_cost_modifier);
        }
    }
    fixed
}

/// Combined per-grade delta of a power's global modifications.
///
/// Globals alter the whole power: their per-grade delta joins every
/// effect's per-grade cost uniformly.
pub fn global_per_grade_delta(
    globals: &[AppliedModification],
    catalog: &Catalog<'_>,
) -> Result<f64, CostError> {
    let mut delta = 0.0;
    for modification in globals {
        let base = catalog.modification_base(modification.modification_base_id())?;
        delta += modification_per_grade(modification, base);
    }
    Ok(delta)
}

/// Combined fixed delta of a power's global modifications, applied once
/// per power rather than once per effect.
pub fn global_fixed_delta(
    globals: &[AppliedModification],
    catalog: &Catalog<'_>,
) -> Result<i64, CostError> {
    let mut delta = 0i64;
    for modification in globals {
        let base = catalog.modification_base(modification.modification_base_id())?;
        delta += modification_fixed(modification, base);
    }
    Ok(delta)
}

/// One effect's cost contribution.
///
/// `per_grade = base cost + local modification deltas + configuration
/// deltas + parameter-transition deltas + global per-grade delta`;
/// `pda = round(per_grade × grade) + fixed deltas`, floored at zero so an
/// effect never subsidizes the rest of the power. PE and espaços are the
/// base's flat contributions.
pub fn effect_cost(
    effect: &AppliedEffect,
    parameters: &PowerParameters,
    catalog: &Catalog<'_>,
    global_per_grade: f64,
) -> Result<PowerCost, CostError> {
    let base = catalog.effect_base(effect.effect_base_id())?;

    let mut per_grade = base.base_cost;
    let mut fixed = 0i64;

    if let Some(option) = effect
        .configuration_id()
        .and_then(|id| base.configuration(id))
    {
        if option.available_at(effect.grade()) {
            per_grade += option.cost_modifier;
            fixed += i64::from(option.fixed_cost_modifier);
        }
    }

    for modification in effect.modifications() {
        let modification_base = catalog.modification_base(modification.modification_base_id())?;
        per_grade += modification_per_grade(modification, modification_base);
        fixed += modification_fixed(modification, modification_base);
    }

    let defaults = base.default_parameters;
    per_grade += f64::from(
        modifier_for(ParameterKind::Action, defaults.action(), parameters.action())
            + modifier_for(ParameterKind::Range, defaults.range(), parameters.range())
            + modifier_for(
                ParameterKind::Duration,
                defaults.duration(),
                parameters.duration(),
            ),
    );

    per_grade += global_per_grade;

    let pda = (per_grade * f64::from(effect.grade())).round() as i64 + fixed;
    Ok(PowerCost::clamped(
        pda,
        i64::from(base.pe_cost),
        i64::from(base.espaco_cost),
    ))
}

/// Total cost of a power: field-wise sum of its effect costs, plus the
/// globals' fixed delta applied once.
pub fn power_cost(
    effects: &[AppliedEffect],
    globals: &[AppliedModification],
    parameters: &PowerParameters,
    catalog: &Catalog<'_>,
) -> Result<PowerCost, CostError> {
    // Resolve every global before touching the effects so a bad reference
    // short-circuits with no partial totals.
    let global_per_grade = global_per_grade_delta(globals, catalog)?;
    let global_fixed = global_fixed_delta(globals, catalog)?;

    let mut total = PowerCost::zero();
    for effect in effects {
        total = total.add(effect_cost(effect, parameters, catalog, global_per_grade)?);
    }

    if global_fixed >= 0 {
        Ok(total.add(PowerCost::clamped(global_fixed, 0, 0)))
    } else {
        Ok(total.subtract(PowerCost::clamped(-global_fixed, 0, 0)))
    }
}

/// Auto-derive a power's parameters as the worst case ("pior parâmetro")
/// across its effects' defaults. `None` when there are no effects.
pub fn derive_parameters(
    effects: &[AppliedEffect],
    catalog: &Catalog<'_>,
) -> Result<Option<PowerParameters>, CostError> {
    let mut actions = Vec::with_capacity(effects.len());
    let mut ranges = Vec::with_capacity(effects.len());
    let mut durations = Vec::with_capacity(effects.len());
    for effect in effects {
        let base = catalog.effect_base(effect.effect_base_id())?;
        actions.push(base.default_parameters.action());
        ranges.push(base.default_parameters.range());
        durations.push(base.default_parameters.duration());
    }

    let (Some(action), Some(range), Some(duration)) = (
        most_restrictive(&actions),
        most_restrictive(&ranges),
        most_restrictive(&durations),
    ) else {
        return Ok(None);
    };

    // Ordinals come from already-validated defaults, so this cannot fail.
    Ok(PowerParameters::new(action, range, duration).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ConfigurationOption;
    use crate::value_objects::ModificationScope;

    struct Fixture {
        effects: HashMap<EffectBaseId, EffectBase>,
        modifications: HashMap<ModificationBaseId, ModificationBase>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                effects: HashMap::new(),
                modifications: HashMap::new(),
            }
        }

        fn effect(&mut self, base: EffectBase) -> EffectBaseId {
            let id = base.id;
            self.effects.insert(id, base);
            id
        }

        fn modification(&mut self, base: ModificationBase) -> ModificationBaseId {
            let id = base.id;
            self.modifications.insert(id, base);
            id
        }

        fn catalog(&self) -> Catalog<'_> {
            Catalog::new(&self.effects, &self.modifications)
        }
    }

    #[test]
    fn base_cost_times_grade_with_local_modification() {
        let mut fixture = Fixture::new();
        let effect_id = fixture.effect(EffectBase::new("Dano", 1.0));
        let mod_id = fixture.modification(ModificationBase::new("Preciso", 1.0));

        let effect = AppliedEffect::new(effect_id, 10)
            .unwrap()
            .add_modification(AppliedModification::new(mod_id, ModificationScope::Local))
            .unwrap();

        // per-grade = 1 + 1 = 2, fixed = 0 -> 2 x 10 = 20
        let cost = effect_cost(
            &effect,
            &PowerParameters::default(),
            &fixture.catalog(),
            0.0,
        )
        .unwrap();
        assert_eq!(cost.pda(), 20);
    }

    #[test]
    fn effect_contribution_never_negative() {
        let mut fixture = Fixture::new();
        let effect_id = fixture.effect(EffectBase::new("Dano", 1.0));
        let flaw_id = fixture.modification(ModificationBase::new("Limitado", -3.0));

        let effect = AppliedEffect::new(effect_id, 5)
            .unwrap()
            .add_modification(AppliedModification::new(flaw_id, ModificationScope::Local))
            .unwrap();

        let cost = effect_cost(
            &effect,
            &PowerParameters::default(),
            &fixture.catalog(),
            0.0,
        )
        .unwrap();
        assert_eq!(cost.pda(), 0);
    }

    #[test]
    fn fractional_per_grade_rounds_once_at_the_end() {
        let mut fixture = Fixture::new();
        let effect_id = fixture.effect(EffectBase::new("Sentidos", 0.5));

        let effect = AppliedEffect::new(effect_id, 5).unwrap();
        let cost = effect_cost(
            &effect,
            &PowerParameters::default(),
            &fixture.catalog(),
            0.0,
        )
        .unwrap();
        // 0.5 x 5 = 2.5 rounds to 3
        assert_eq!(cost.pda(), 3);
    }

    #[test]
    fn configuration_deltas_apply_when_gate_met() {
        let mut fixture = Fixture::new();
        let effect_id = fixture.effect(
            EffectBase::new("Dano", 1.0).with_configuration(
                ConfigurationOption::new("brutal", "Brutal")
                    .with_cost_modifier(1.0)
                    .with_fixed_cost_modifier(2)
                    .with_minimum_grade(5),
            ),
        );

        let gated = AppliedEffect::new(effect_id, 4)
            .unwrap()
            .with_configuration("brutal");
        let cost = effect_cost(&gated, &PowerParameters::default(), &fixture.catalog(), 0.0)
            .unwrap();
        assert_eq!(cost.pda(), 4); // gate unmet: base cost only

        let open = AppliedEffect::new(effect_id, 5)
            .unwrap()
            .with_configuration("brutal");
        let cost = effect_cost(&open, &PowerParameters::default(), &fixture.catalog(), 0.0)
            .unwrap();
        assert_eq!(cost.pda(), 12); // (1+1) x 5 + 2
    }

    #[test]
    fn parameter_transitions_join_the_per_grade_cost() {
        let mut fixture = Fixture::new();
        let effect_id = fixture.effect(EffectBase::new("Dano", 1.0));

        let effect = AppliedEffect::new(effect_id, 4).unwrap();
        // duration 0 -> 2 walks +1 +2 = +3 per grade
        let parameters = PowerParameters::new(2, 1, 2).unwrap();
        let cost = effect_cost(&effect, &parameters, &fixture.catalog(), 0.0).unwrap();
        assert_eq!(cost.pda(), 16); // (1+3) x 4
    }

    #[test]
    fn flat_pe_and_espacos_flow_from_the_base() {
        let mut fixture = Fixture::new();
        let effect_id = fixture.effect(
            EffectBase::new("Barreira", 2.0)
                .with_pe_cost(3)
                .with_espaco_cost(1),
        );

        let effect = AppliedEffect::new(effect_id, 2).unwrap();
        let cost = effect_cost(
            &effect,
            &PowerParameters::default(),
            &fixture.catalog(),
            0.0,
        )
        .unwrap();
        assert_eq!((cost.pda(), cost.pe(), cost.espacos()), (4, 3, 1));
    }

    #[test]
    fn globals_scale_every_effect_and_fix_once() {
        let mut fixture = Fixture::new();
        let first = fixture.effect(EffectBase::new("Dano", 1.0));
        let second = fixture.effect(EffectBase::new("Barreira", 1.0));
        let global_id = fixture.modification(ModificationBase::new("Ritual", 1.0).with_fixed_cost(2));

        let effects = vec![
            AppliedEffect::new(first, 2).unwrap(),
            AppliedEffect::new(second, 3).unwrap(),
        ];
        let globals = vec![AppliedModification::new(global_id, ModificationScope::Global)];

        let total = power_cost(
            &effects,
            &globals,
            &PowerParameters::default(),
            &fixture.catalog(),
        )
        .unwrap();
        // (1+1)x2 + (1+1)x3 + 2 fixed once = 4 + 6 + 2
        assert_eq!(total.pda(), 12);
    }

    #[test]
    fn global_grade_scales_its_per_grade_delta() {
        let mut fixture = Fixture::new();
        let effect_id = fixture.effect(EffectBase::new("Dano", 1.0));
        let global_id = fixture.modification(ModificationBase::new("Ampliado", 1.0));

        let effects = vec![AppliedEffect::new(effect_id, 2).unwrap()];
        let globals = vec![
            AppliedModification::new(global_id, ModificationScope::Global)
                .with_grade(3)
                .unwrap(),
        ];

        let total = power_cost(
            &effects,
            &globals,
            &PowerParameters::default(),
            &fixture.catalog(),
        )
        .unwrap();
        // per-grade = 1 + (1 x 3) = 4; 4 x 2 = 8
        assert_eq!(total.pda(), 8);
    }

    #[test]
    fn unresolved_effect_reference_short_circuits() {
        let fixture = Fixture::new();
        let orphan = AppliedEffect::new(EffectBaseId::new(), 1).unwrap();

        let result = power_cost(
            std::slice::from_ref(&orphan),
            &[],
            &PowerParameters::default(),
            &fixture.catalog(),
        );
        assert!(matches!(result, Err(CostError::EffectBaseNotFound(_))));
    }

    #[test]
    fn unresolved_modification_reference_short_circuits() {
        let mut fixture = Fixture::new();
        let effect_id = fixture.effect(EffectBase::new("Dano", 1.0));

        let effect = AppliedEffect::new(effect_id, 1)
            .unwrap()
            .add_modification(AppliedModification::new(
                ModificationBaseId::new(),
                ModificationScope::Local,
            ))
            .unwrap();

        let result = effect_cost(
            &effect,
            &PowerParameters::default(),
            &fixture.catalog(),
            0.0,
        );
        assert!(matches!(
            result,
            Err(CostError::ModificationBaseNotFound(_))
        ));
    }

    #[test]
    fn derive_parameters_takes_the_worst_case() {
        let mut fixture = Fixture::new();
        let melee = fixture.effect(
            EffectBase::new("Golpe", 1.0)
                .with_default_parameters(PowerParameters::new(2, 1, 0).unwrap()),
        );
        let aura = fixture.effect(
            EffectBase::new("Aura", 1.0)
                .with_default_parameters(PowerParameters::new(1, 0, 2).unwrap()),
        );

        let effects = vec![
            AppliedEffect::new(melee, 1).unwrap(),
            AppliedEffect::new(aura, 1).unwrap(),
        ];

        let derived = derive_parameters(&effects, &fixture.catalog())
            .unwrap()
            .unwrap();
        assert_eq!(derived.action(), 1);
        assert_eq!(derived.range(), 0);
        assert_eq!(derived.duration(), 0);
    }

    #[test]
    fn derive_parameters_empty_means_no_effects() {
        let fixture = Fixture::new();
        assert_eq!(derive_parameters(&[], &fixture.catalog()).unwrap(), None);
    }
}
