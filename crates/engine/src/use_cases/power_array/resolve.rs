//! Shared member resolution for the array use cases.

use poderes_domain::{Power, PowerId};

use crate::infrastructure::ports::PowerRepo;

use super::error::PowerArrayError;

/// Resolve every member id against the power repository.
///
/// Any missing id aborts with the typed not-found so callers never
/// perform a partial write.
pub(crate) async fn resolve_members(
    power_repo: &dyn PowerRepo,
    power_ids: &[PowerId],
) -> Result<Vec<Power>, PowerArrayError> {
    let mut powers = Vec::with_capacity(power_ids.len());
    for &power_id in power_ids {
        let power = power_repo
            .get(power_id)
            .await?
            .ok_or(PowerArrayError::PowerNotFound(power_id))?;
        powers.push(power);
    }
    Ok(powers)
}
