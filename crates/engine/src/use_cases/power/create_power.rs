//! Create power use case.
//!
//! Orchestrates: input validation, catalog resolution, cost aggregation,
//! aggregate construction, persistence, event dispatch.

use std::sync::Arc;

use poderes_domain::{
    AlternativeCost, Description, Domain, EventDispatcher, Note, Power, PowerName,
    PowerParameters,
};

use crate::infrastructure::ports::{EffectBaseRepo, ModificationBaseRepo, PowerRepo};

use super::composition::{
    applied_effects, applied_modification, apply_power_floor, load_catalog, price_composition,
    resolve_parameters,
};
use super::error::PowerError;
use super::types::{EffectInput, ModificationInput};
use poderes_domain::ModificationScope;

/// Everything needed to compose a new power
#[derive(Debug, Clone)]
pub struct CreatePowerInput {
    pub name: String,
    pub description: String,
    pub domain: Domain,
    /// Explicit manifestation override; derived from the effects'
    /// defaults (worst case) when absent.
    pub parameters: Option<PowerParameters>,
    pub effects: Vec<EffectInput>,
    pub global_modifications: Vec<ModificationInput>,
    pub alternative_cost: Option<AlternativeCost>,
    pub is_custom: bool,
    pub notes: Option<String>,
}

/// Create power use case.
pub struct CreatePower {
    power_repo: Arc<dyn PowerRepo>,
    effect_repo: Arc<dyn EffectBaseRepo>,
    modification_repo: Arc<dyn ModificationBaseRepo>,
    dispatcher: Arc<EventDispatcher>,
}

impl CreatePower {
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

    /// Execute the create power use case.
    ///
    /// # Returns
    /// * `Ok(Power)` - The validated, persisted power
    /// * `Err(PowerError)` - Typed not-found for unresolved catalog
    ///   references; validation errors surface unconverted
    pub async fn execute(&self, input: CreatePowerInput) -> Result<Power, PowerError> {
        let name = PowerName::new(input.name)?;
        let description = Description::new(input.description)?;
        let notes = input.notes.map(Note::new).transpose()?;

        let effects = applied_effects(&input.effects)?;
        let mut globals = Vec::with_capacity(input.global_modifications.len());
        for modification in &input.global_modifications {
            globals.push(applied_modification(modification, ModificationScope::Global)?);
        }

        // Resolve every reference before computing anything: a single miss
        // aborts with no partial work.
        let snapshot = load_catalog(
            self.effect_repo.as_ref(),
            self.modification_repo.as_ref(),
            &effects,
            &globals,
        )
        .await?;
        let catalog = snapshot.catalog();

        let parameters = resolve_parameters(input.parameters, &effects, &catalog)?;
        let (effects, total) = price_composition(&effects, &globals, &parameters, &catalog)?;
        let total = apply_power_floor(total);

        let mut power = Power::create(
            name,
            description,
            input.domain,
            parameters,
            effects,
            globals,
            total,
        )?
        .with_custom(input.is_custom);
        if let Some(alternative_cost) = input.alternative_cost {
            power = power.with_alternative_cost(alternative_cost);
        }
        if let Some(notes) = notes {
            power = power.with_notes(notes);
        }

        self.power_repo.create(&power).await?;

        self.dispatcher.flush(&mut power);
        power.commit_changes();

        tracing::info!(
            power_id = %power.id(),
            name = %power.name(),
            pda = power.total_cost().pda(),
            "Power created"
        );

        Ok(power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockEffectBaseRepo, MockModificationBaseRepo, MockPowerRepo,
    };
    use poderes_domain::{DomainName, EffectBase, EffectBaseId, ModificationBase};

    fn test_input(effect_base_id: EffectBaseId) -> CreatePowerInput {
        CreatePowerInput {
            name: "Rajada".to_string(),
            description: "Um jato de energia".to_string(),
            domain: Domain::new(DomainName::Arcano).unwrap(),
            parameters: None,
            effects: vec![EffectInput::new(effect_base_id, 10)],
            global_modifications: Vec::new(),
            alternative_cost: None,
            is_custom: false,
            notes: None,
        }
    }

    fn use_case(
        power_repo: MockPowerRepo,
        effect_repo: MockEffectBaseRepo,
        modification_repo: MockModificationBaseRepo,
    ) -> CreatePower {
        CreatePower::new(
            Arc::new(power_repo),
            Arc::new(effect_repo),
            Arc::new(modification_repo),
            Arc::new(EventDispatcher::new()),
        )
    }

    #[tokio::test]
    async fn when_effect_base_missing_returns_not_found() {
        let mut effect_repo = MockEffectBaseRepo::new();
        effect_repo.expect_get().returning(|_| Ok(None));

        let power_repo = MockPowerRepo::new();
        let modification_repo = MockModificationBaseRepo::new();

        let result = use_case(power_repo, effect_repo, modification_repo)
            .execute(test_input(EffectBaseId::new()))
            .await;

        assert!(matches!(result, Err(PowerError::EffectNotFound(_))));
    }

    #[tokio::test]
    async fn when_name_empty_returns_validation_error() {
        let power_repo = MockPowerRepo::new();
        let effect_repo = MockEffectBaseRepo::new();
        let modification_repo = MockModificationBaseRepo::new();

        let mut input = test_input(EffectBaseId::new());
        input.name = "  ".to_string();

        let result = use_case(power_repo, effect_repo, modification_repo)
            .execute(input)
            .await;

        assert!(matches!(result, Err(PowerError::Validation(_))));
    }

    #[tokio::test]
    async fn when_valid_computes_cost_and_persists() {
        let effect_base = EffectBase::new("Dano", 1.0);
        let effect_base_id = effect_base.id;

        let mut effect_repo = MockEffectBaseRepo::new();
        effect_repo
            .expect_get()
            .withf(move |id| *id == effect_base_id)
            .returning(move |_| Ok(Some(effect_base.clone())));

        let mut power_repo = MockPowerRepo::new();
        power_repo.expect_create().returning(|_| Ok(()));

        let modification_repo = MockModificationBaseRepo::new();

        let power = use_case(power_repo, effect_repo, modification_repo)
            .execute(test_input(effect_base_id))
            .await
            .unwrap();

        // base 1.0 x grade 10
        assert_eq!(power.total_cost().pda(), 10);
        assert_eq!(power.effects()[0].cost().pda(), 10);
        assert!(!power.has_uncommitted_changes());
    }

    #[tokio::test]
    async fn when_local_modification_present_scales_per_grade_cost() {
        let effect_base = EffectBase::new("Dano", 1.0);
        let effect_base_id = effect_base.id;
        let modification_base = ModificationBase::new("Preciso", 1.0);
        let modification_base_id = modification_base.id;

        let mut effect_repo = MockEffectBaseRepo::new();
        effect_repo
            .expect_get()
            .returning(move |_| Ok(Some(effect_base.clone())));

        let mut modification_repo = MockModificationBaseRepo::new();
        modification_repo
            .expect_get()
            .withf(move |id| *id == modification_base_id)
            .returning(move |_| Ok(Some(modification_base.clone())));

        let mut power_repo = MockPowerRepo::new();
        power_repo.expect_create().returning(|_| Ok(()));

        let mut input = test_input(effect_base_id);
        input.effects = vec![EffectInput::new(effect_base_id, 10)
            .with_modification(ModificationInput::new(modification_base_id))];

        let power = use_case(power_repo, effect_repo, modification_repo)
            .execute(input)
            .await
            .unwrap();

        // per-grade = 1 + 1 = 2 -> 2 x 10 = 20
        assert_eq!(power.total_cost().pda(), 20);
    }

    #[tokio::test]
    async fn when_flaws_zero_out_cost_the_floor_holds() {
        let effect_base = EffectBase::new("Dano", 1.0);
        let effect_base_id = effect_base.id;
        let flaw = ModificationBase::new("Limitado", -1.0);
        let flaw_id = flaw.id;

        let mut effect_repo = MockEffectBaseRepo::new();
        effect_repo
            .expect_get()
            .returning(move |_| Ok(Some(effect_base.clone())));

        let mut modification_repo = MockModificationBaseRepo::new();
        modification_repo
            .expect_get()
            .returning(move |_| Ok(Some(flaw.clone())));

        let mut power_repo = MockPowerRepo::new();
        power_repo.expect_create().returning(|_| Ok(()));

        let mut input = test_input(effect_base_id);
        input.effects = vec![
            EffectInput::new(effect_base_id, 10)
                .with_modification(ModificationInput::new(flaw_id)),
        ];

        let power = use_case(power_repo, effect_repo, modification_repo)
            .execute(input)
            .await
            .unwrap();

        // per-grade nets to zero; a power still costs at least 1 PdA
        assert_eq!(power.total_cost().pda(), 1);
    }
}
