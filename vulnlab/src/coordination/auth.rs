use subtle::ConstantTimeEq;

use crate::session::{IdentityContext, Session, SessionManager, UserId};
use crate::storage::LabStore;

use super::errors::CoordinationError;

/// Checks the credentials and opens a new session for the user.
///
/// The returned session replaces whatever session the client held before.
#[tracing::instrument(skip(store, manager, password))]
pub async fn login(
    store: &LabStore,
    manager: &SessionManager,
    username: &str,
    password: &str,
) -> Result<(Session, UserId), CoordinationError> {
    let Some(credentials) = store.get_credentials(username).await? else {
        return Err(CoordinationError::InvalidCredentials.log());
    };

    let matches: bool = credentials
        .password
        .as_bytes()
        .ct_eq(password.as_bytes())
        .into();
    if !matches {
        return Err(CoordinationError::InvalidCredentials.log());
    }

    let user_id = UserId::new(credentials.id);
    tracing::info!(user_id = %user_id, "User logged in");
    Ok((manager.create(user_id), user_id))
}

/// Produces the expired session the client must store in place of its own.
///
/// Works with or without a current session so that logout never fails.
pub fn logout(manager: &SessionManager, session: Option<&Session>) -> Session {
    match session {
        Some(session) => {
            tracing::info!("Session invalidated");
            manager.invalidate(session)
        }
        None => manager.expired(),
    }
}

pub fn who_am_i(identity: &IdentityContext) -> UserId {
    identity.user_id()
}
