//! Create power array use case.
//!
//! Members are referenced by id and resolved against the powers
//! repository; the aggregate's total is the generic field-wise sum of the
//! resolved members' costs (the themed "principal + 1" pricing is a
//! separate rule the caller invokes explicitly when it wants it).

use std::sync::Arc;

use poderes_domain::{
    rules, ArrayName, Description, Domain, EventDispatcher, Note, PowerArray, PowerArrayKind,
    PowerId, PowerParameters,
};

use crate::infrastructure::ports::{PowerArrayRepo, PowerRepo};

use super::error::PowerArrayError;
use super::resolve::resolve_members;

/// Everything needed to group powers into an array
#[derive(Debug, Clone)]
pub struct CreatePowerArrayInput {
    pub name: String,
    pub description: String,
    pub domain: Domain,
    pub kind: PowerArrayKind,
    pub base_parameters: Option<PowerParameters>,
    pub power_ids: Vec<PowerId>,
    pub notes: Option<String>,
}

/// Create power array use case.
pub struct CreatePowerArray {
    array_repo: Arc<dyn PowerArrayRepo>,
    power_repo: Arc<dyn PowerRepo>,
    dispatcher: Arc<EventDispatcher>,
}

impl CreatePowerArray {
    pub fn new(
        array_repo: Arc<dyn PowerArrayRepo>,
        power_repo: Arc<dyn PowerRepo>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            array_repo,
            power_repo,
            dispatcher,
        }
    }

    /// Execute the create power array use case.
    pub async fn execute(
        &self,
        input: CreatePowerArrayInput,
    ) -> Result<PowerArray, PowerArrayError> {
        let name = ArrayName::new(input.name)?;
        let description = Description::new(input.description)?;
        let notes = input.notes.map(Note::new).transpose()?;

        let powers = resolve_members(self.power_repo.as_ref(), &input.power_ids).await?;
        let total_cost = rules::sum_member_costs(&powers);

        let mut array = PowerArray::create(
            name,
            description,
            input.domain,
            input.kind,
            powers,
            total_cost,
        )?;
        if let Some(parameters) = input.base_parameters {
            array = array.with_base_parameters(parameters);
        }
        if let Some(notes) = notes {
            array = array.with_notes(notes);
        }

        self.array_repo.create(&array).await?;

        self.dispatcher.flush(&mut array);
        array.commit_changes();

        tracing::info!(
            array_id = %array.id(),
            name = %array.name(),
            members = array.powers().len(),
            pda = array.total_cost().pda(),
            "Power array created"
        );

        Ok(array)
    }
}
