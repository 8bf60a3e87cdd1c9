//! End-to-end flows over the in-memory adapters: composition, pricing,
//! pagination and event dispatch, with no mocks in the loop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use poderes_domain::{
    Domain, DomainName, EffectBase, EventDispatcher, ModificationBase, PowerArrayKind,
};

use crate::infrastructure::persistence::memory::{
    InMemoryEffectBaseRepo, InMemoryModificationBaseRepo, InMemoryPowerArrayRepo,
    InMemoryPowerRepo,
};
use crate::infrastructure::ports::{EffectBaseRepo as _, ModificationBaseRepo as _, Page};
use crate::use_cases::{
    CreatePower, CreatePowerArray, CreatePowerArrayInput, CreatePowerInput, EffectInput,
    ListPowers, ModificationInput,
};

struct Harness {
    power_repo: Arc<InMemoryPowerRepo>,
    array_repo: Arc<InMemoryPowerArrayRepo>,
    effect_repo: Arc<InMemoryEffectBaseRepo>,
    modification_repo: Arc<InMemoryModificationBaseRepo>,
    dispatcher: Arc<EventDispatcher>,
}

impl Harness {
    fn new() -> Self {
        Self::with_dispatcher(EventDispatcher::new())
    }

    fn with_dispatcher(dispatcher: EventDispatcher) -> Self {
        Self {
            power_repo: Arc::new(InMemoryPowerRepo::new()),
            array_repo: Arc::new(InMemoryPowerArrayRepo::new()),
            effect_repo: Arc::new(InMemoryEffectBaseRepo::new()),
            modification_repo: Arc::new(InMemoryModificationBaseRepo::new()),
            dispatcher: Arc::new(dispatcher),
        }
    }

    fn create_power(&self) -> CreatePower {
        CreatePower::new(
            self.power_repo.clone(),
            self.effect_repo.clone(),
            self.modification_repo.clone(),
            self.dispatcher.clone(),
        )
    }

    fn create_array(&self) -> CreatePowerArray {
        CreatePowerArray::new(
            self.array_repo.clone(),
            self.power_repo.clone(),
            self.dispatcher.clone(),
        )
    }

    fn power_input(&self, name: &str, effects: Vec<EffectInput>) -> CreatePowerInput {
        CreatePowerInput {
            name: name.to_string(),
            description: "Poder de teste".to_string(),
            domain: Domain::new(DomainName::Arcano).unwrap(),
            parameters: None,
            effects,
            global_modifications: Vec::new(),
            alternative_cost: None,
            is_custom: false,
            notes: None,
        }
    }
}

#[tokio::test]
async fn composed_powers_sum_into_an_array() {
    let harness = Harness::new();

    // base 1 PdA/grade
    let damage = EffectBase::new("Dano", 1.0);
    let damage_id = damage.id;
    harness.effect_repo.create(&damage).await.unwrap();

    // +1 PdA/grade extra
    let precise = ModificationBase::new("Preciso", 1.0);
    let precise_id = precise.id;
    harness.modification_repo.create(&precise).await.unwrap();

    // 1.5 PdA/grade base for the second power
    let blast = EffectBase::new("Explosão", 1.5);
    let blast_id = blast.id;
    harness.effect_repo.create(&blast).await.unwrap();

    // (1 + 1) x 10 = 20 PdA
    let first = harness
        .create_power()
        .execute(harness.power_input(
            "Rajada",
            vec![EffectInput::new(damage_id, 10)
                .with_modification(ModificationInput::new(precise_id))],
        ))
        .await
        .unwrap();
    assert_eq!(first.total_cost().pda(), 20);

    // 1.5 x 10 = 15 PdA
    let second = harness
        .create_power()
        .execute(harness.power_input("Onda de Choque", vec![EffectInput::new(blast_id, 10)]))
        .await
        .unwrap();
    assert_eq!(second.total_cost().pda(), 15);

    // generic array rule: field-wise sum
    let array = harness
        .create_array()
        .execute(CreatePowerArrayInput {
            name: "Arsenal Arcano".to_string(),
            description: "Truques de batalha".to_string(),
            domain: Domain::new(DomainName::Arcano).unwrap(),
            kind: PowerArrayKind::Normal,
            base_parameters: None,
            power_ids: vec![first.id(), second.id()],
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(array.total_cost().pda(), 35);
    assert_eq!(harness.array_repo.len(), 1);
}

#[tokio::test]
async fn listing_pages_twenty_at_a_time_in_creation_order() {
    let harness = Harness::new();

    let effect = EffectBase::new("Dano", 1.0);
    let effect_id = effect.id;
    harness.effect_repo.create(&effect).await.unwrap();

    for i in 1..=25 {
        harness
            .create_power()
            .execute(harness.power_input(
                &format!("Poder {i}"),
                vec![EffectInput::new(effect_id, 1)],
            ))
            .await
            .unwrap();
    }

    let list_powers = ListPowers::new(harness.power_repo.clone());

    let first_page = list_powers.execute(Page::first()).await.unwrap();
    assert_eq!(first_page.len(), 20);
    assert_eq!(first_page[0].name().as_str(), "Poder 1");
    assert_eq!(first_page[19].name().as_str(), "Poder 20");

    let second_page = list_powers.execute(Page::number(2)).await.unwrap();
    assert_eq!(second_page.len(), 5);
    assert_eq!(second_page[0].name().as_str(), "Poder 21");
    assert_eq!(second_page[4].name().as_str(), "Poder 25");
}

#[tokio::test]
async fn creation_flushes_queued_events_to_subscribers() {
    let delivered = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&delivered);

    let mut dispatcher = EventDispatcher::new();
    dispatcher.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let harness = Harness::with_dispatcher(dispatcher);

    let effect = EffectBase::new("Dano", 1.0);
    let effect_id = effect.id;
    harness.effect_repo.create(&effect).await.unwrap();

    let power = harness
        .create_power()
        .execute(harness.power_input("Rajada", vec![EffectInput::new(effect_id, 3)]))
        .await
        .unwrap();

    // PowerCreated was flushed after persistence
    assert_eq!(delivered.load(Ordering::SeqCst), 1);
    // and the returned aggregate is clean
    assert!(!power.has_uncommitted_changes());
}
