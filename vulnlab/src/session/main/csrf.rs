use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::authz::ProtectionMode;
use crate::session::errors::SessionError;
use crate::session::types::{CsrfToken, Session};

use super::session::SessionManager;

/// Protected mutation refused because the anti-forgery token did not match.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid CSRF token")]
pub struct CsrfRejected;

/// Mints a fresh token for the session, replacing the previous one.
pub fn issue_csrf_token(
    manager: &SessionManager,
    session: &Session,
) -> Result<(CsrfToken, Session), SessionError> {
    manager.mint_csrf_token(session)
}

/// True iff the session holds a non-empty token equal to `supplied`.
///
/// Missing tokens on either side are a plain `false`, never an error, so the
/// unprotected path can call this and carry on.
pub fn verify_csrf_token(session: &Session, supplied: Option<&str>) -> bool {
    let Some(stored) = session.csrf_token().filter(|t| !t.is_empty()) else {
        tracing::debug!("No CSRF token stored in session");
        return false;
    };
    let Some(supplied) = supplied.filter(|t| !t.is_empty()) else {
        tracing::debug!("No CSRF token supplied");
        return false;
    };
    stored.as_bytes().ct_eq(supplied.as_bytes()).into()
}

/// Applies the guard according to the request's protection mode.
///
/// Unprotected requests always pass; the verification result is only logged.
pub fn csrf_guard(
    mode: ProtectionMode,
    session: &Session,
    supplied: Option<&str>,
) -> Result<(), CsrfRejected> {
    let verified = verify_csrf_token(session, supplied);
    match mode {
        ProtectionMode::Protected if !verified => {
            tracing::warn!("CSRF token missing or mismatched; refusing protected mutation");
            Err(CsrfRejected)
        }
        ProtectionMode::Protected => Ok(()),
        ProtectionMode::Unprotected => {
            if !verified {
                tracing::warn!("Unprotected mutation proceeding without a valid CSRF token");
            }
            Ok(())
        }
    }
}
