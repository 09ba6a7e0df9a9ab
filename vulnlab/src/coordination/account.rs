use crate::authz::{AccountUpdate, ProtectionMode, account};
use crate::session::{IdentityContext, Session, csrf_guard};
use crate::storage::{Account, LabStore, StorageError};

use super::errors::CoordinationError;
use super::types::MutationOutcome;

const MAX_PLAN_LEN: usize = 32;

#[tracing::instrument(skip(store, identity), fields(user_id = %identity.user_id()))]
pub async fn get_account(
    store: &LabStore,
    identity: &IdentityContext,
) -> Result<Account, CoordinationError> {
    store
        .get_account(identity.user_id())
        .await?
        .ok_or_else(|| CoordinationError::not_found("Account", identity.user_id()).log())
}

/// Updates the caller's account through the field-privilege filter.
///
/// Protected mode also requires the session's CSRF token. Returns the account
/// as stored after the update.
#[tracing::instrument(
    skip(store, identity, session, update, supplied_token),
    fields(user_id = %identity.user_id(), mode = %mode)
)]
pub async fn apply_account_mutation(
    store: &LabStore,
    identity: &IdentityContext,
    session: &Session,
    update: AccountUpdate,
    mode: ProtectionMode,
    supplied_token: Option<&str>,
) -> Result<MutationOutcome<Account>, CoordinationError> {
    // The guard runs before any look at the payload.
    if csrf_guard(mode, session, supplied_token).is_err() {
        return Ok(MutationOutcome::CsrfRejected);
    }

    validate_plan(&update.plan)?;

    let changes = account::decide(mode, identity, update);
    match store.apply_account_changes(&changes).await {
        Ok(()) => {}
        Err(StorageError::NotFound) => {
            return Err(CoordinationError::not_found("Account", identity.user_id()).log());
        }
        Err(e) => return Err(e.into()),
    }

    get_account(store, identity)
        .await
        .map(MutationOutcome::Applied)
}

fn validate_plan(plan: &str) -> Result<(), CoordinationError> {
    if plan.trim().is_empty() {
        return Err(CoordinationError::Validation("plan is required".to_string()).log());
    }
    if plan.chars().count() > MAX_PLAN_LEN {
        return Err(CoordinationError::Validation(format!(
            "plan must be at most {MAX_PLAN_LEN} characters"
        ))
        .log());
    }
    Ok(())
}
