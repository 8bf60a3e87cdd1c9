//! Update power array use case.
//!
//! When `power_ids` is supplied the membership is re-resolved and the
//! total re-summed; a missing id aborts before any write, leaving the
//! stored array untouched.

use std::sync::Arc;

use poderes_domain::{
    rules, ArrayName, Description, EventDispatcher, Note, PowerArray, PowerArrayId,
    PowerArrayKind, PowerId, PowerParameters,
};

use crate::infrastructure::ports::{PowerArrayRepo, PowerRepo};

use super::error::PowerArrayError;
use super::resolve::resolve_members;

/// Partial update: absent fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct UpdatePowerArrayInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<PowerArrayKind>,
    /// `Some(None)` clears the base parameters.
    pub base_parameters: Option<Option<PowerParameters>>,
    pub power_ids: Option<Vec<PowerId>>,
    /// `Some(None)` clears the notes.
    pub notes: Option<Option<String>>,
}

/// Update power array use case.
pub struct UpdatePowerArray {
    array_repo: Arc<dyn PowerArrayRepo>,
    power_repo: Arc<dyn PowerRepo>,
    dispatcher: Arc<EventDispatcher>,
}

impl UpdatePowerArray {
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

    /// Execute the update power array use case.
    pub async fn execute(
        &self,
        array_id: PowerArrayId,
        input: UpdatePowerArrayInput,
    ) -> Result<PowerArray, PowerArrayError> {
        let mut array = self
            .array_repo
            .get(array_id)
            .await?
            .ok_or(PowerArrayError::ArrayNotFound(array_id))?;

        if let Some(name) = input.name {
            array = array.update_name(ArrayName::new(name)?);
        }
        if let Some(description) = input.description {
            array = array.update_description(Description::new(description)?);
        }
        if let Some(kind) = input.kind {
            array = array.update_kind(kind);
        }
        if let Some(parameters) = input.base_parameters {
            array = array.update_base_parameters(parameters);
        }
        if let Some(notes) = input.notes {
            array = array.update_notes(notes.map(Note::new).transpose()?);
        }

        if let Some(power_ids) = input.power_ids {
            let powers = resolve_members(self.power_repo.as_ref(), &power_ids).await?;
            let total_cost = rules::sum_member_costs(&powers);
            array = array.update_powers(powers)?;
            array = array.with_total_cost(total_cost);
        }

        self.array_repo.update(&array).await?;

        self.dispatcher.flush(&mut array);
        array.commit_changes();

        tracing::info!(
            array_id = %array.id(),
            pda = array.total_cost().pda(),
            "Power array updated"
        );

        Ok(array)
    }
}
