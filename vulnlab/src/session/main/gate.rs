use http::HeaderMap;
use thiserror::Error;

use crate::session::errors::{IdentityError, SessionError};
use crate::session::types::{IdentityContext, Session};

use super::identity::normalize_user_id;
use super::session::SessionManager;

/// The request did not present a usable session.
#[derive(Debug, Error, Clone)]
pub enum AuthRejected {
    #[error("invalid session")]
    InvalidSession(#[source] SessionError),

    #[error("invalid user id")]
    InvalidIdentity(#[source] IdentityError),
}

/// Output of the auth gate: the verified session plus the identity derived from it.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub session: Session,
    pub identity: IdentityContext,
}

/// Resolves the request's session into an identity, or rejects the request.
///
/// This is the only place sessions are read and subjects are normalized;
/// everything downstream works with [`IdentityContext`].
pub fn authenticate(
    manager: &SessionManager,
    headers: &HeaderMap,
) -> Result<AuthenticatedSession, AuthRejected> {
    let session = manager.read(headers).map_err(|e| {
        tracing::debug!("Session rejected: {}", e);
        AuthRejected::InvalidSession(e)
    })?;

    let user_id = normalize_user_id(session.subject()).map_err(|e| {
        tracing::warn!("Session carries an unusable subject: {}", e);
        AuthRejected::InvalidIdentity(e)
    })?;

    tracing::debug!(user_id = %user_id, "Session authenticated");

    Ok(AuthenticatedSession {
        session,
        identity: IdentityContext::new(user_id),
    })
}
