use crate::authz::{ProtectionMode, ownership};
use crate::session::{IdentityContext, UserId};
use crate::storage::LabStore;

use super::errors::CoordinationError;
use super::types::ProfileOutcome;

/// Loads the profile the caller asked for, subject to the ownership check.
///
/// `requested_id` comes straight from the request body and must be positive.
#[tracing::instrument(skip(store, identity), fields(user_id = %identity.user_id()))]
pub async fn check_ownership(
    store: &LabStore,
    identity: &IdentityContext,
    requested_id: i64,
    mode: ProtectionMode,
) -> Result<ProfileOutcome, CoordinationError> {
    if requested_id <= 0 {
        return Err(CoordinationError::Validation("invalid targetUserId".to_string()).log());
    }

    let decision = ownership::decide(mode, identity, UserId::new(requested_id));
    let effective_id = match decision.into_result() {
        Ok(id) => id,
        Err(rejected) => {
            tracing::debug!(requested_id = %rejected.requested_id, "{}", rejected);
            return Ok(ProfileOutcome::Rejected(decision));
        }
    };

    let profile = store
        .get_profile(effective_id)
        .await?
        .ok_or_else(|| CoordinationError::not_found("Profile", effective_id).log())?;

    Ok(ProfileOutcome::Granted { decision, profile })
}
