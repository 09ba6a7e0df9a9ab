use crate::authz::ProtectionMode;
use crate::session::{self, CsrfToken, IdentityContext, Session, SessionManager, csrf_guard};
use crate::storage::{LabStore, StorageError};

use super::errors::CoordinationError;
use super::types::MutationOutcome;

/// Mints the session's anti-forgery token. The caller must send the returned
/// session back to the client.
pub fn issue_csrf_token(
    manager: &SessionManager,
    session: &Session,
) -> Result<(CsrfToken, Session), CoordinationError> {
    Ok(session::issue_csrf_token(manager, session)?)
}

#[tracing::instrument(skip(store, identity), fields(user_id = %identity.user_id()))]
pub async fn get_profile_email(
    store: &LabStore,
    identity: &IdentityContext,
) -> Result<String, CoordinationError> {
    store
        .get_profile(identity.user_id())
        .await?
        .map(|profile| profile.email)
        .ok_or_else(|| CoordinationError::not_found("Profile", identity.user_id()).log())
}

/// Changes the caller's email, enforcing the CSRF check in protected mode.
///
/// Returns the stored email after the update.
#[tracing::instrument(
    skip(store, identity, session, email, supplied_token),
    fields(user_id = %identity.user_id(), mode = %mode)
)]
pub async fn change_email(
    store: &LabStore,
    identity: &IdentityContext,
    session: &Session,
    email: &str,
    mode: ProtectionMode,
    supplied_token: Option<&str>,
) -> Result<MutationOutcome<String>, CoordinationError> {
    // The guard runs before any look at the payload.
    if csrf_guard(mode, session, supplied_token).is_err() {
        return Ok(MutationOutcome::CsrfRejected);
    }

    if email.trim().is_empty() {
        return Err(CoordinationError::Validation("email is required".to_string()).log());
    }

    match store.update_email(identity.user_id(), email).await {
        Ok(()) => {}
        Err(StorageError::NotFound) => {
            return Err(CoordinationError::not_found("Profile", identity.user_id()).log());
        }
        Err(e) => return Err(e.into()),
    }

    get_profile_email(store, identity)
        .await
        .map(MutationOutcome::Applied)
}
