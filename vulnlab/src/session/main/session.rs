use std::sync::Arc;

use chrono::{Duration, Utc};
use http::HeaderMap;

use crate::session::config::SessionConfig;
use crate::session::errors::SessionError;
use crate::session::types::{CsrfToken, Session, SubjectId, UserId};
use crate::utils::{CookieAttributes, gen_random_string, header_set_cookie};

use super::cookie::get_cookie_from_headers;
use super::signing::{open, seal};

/// 32 random bytes, well above the 128 bits a CSRF token needs.
const CSRF_TOKEN_BYTES: usize = 32;

/// Upper bound on configured lifetimes (ten years) to keep timestamps in range.
const MAX_SESSION_LIFETIME_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Issues, reads and invalidates client-held signed sessions.
///
/// Cheap to clone; the configuration (including the signing secret) is shared
/// and never mutated after construction. The manager does no I/O: every
/// mutation returns a new [`Session`] that the transport layer turns into a
/// `Set-Cookie` header with [`SessionManager::set_cookie`].
#[derive(Debug, Clone)]
pub struct SessionManager {
    config: Arc<SessionConfig>,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// New session bound to `user_id`, replacing whatever the client held before.
    pub fn create(&self, user_id: UserId) -> Session {
        self.create_with_subject(user_id.into())
    }

    /// New session with an arbitrary stored subject representation.
    pub fn create_with_subject(&self, subject: SubjectId) -> Session {
        let issued_at = Utc::now();
        Session {
            subject,
            csrf_token: None,
            issued_at,
            expires_at: issued_at + Duration::seconds(self.max_age_secs()),
        }
    }

    /// Reads and verifies the session cookie from request headers.
    pub fn read(&self, headers: &HeaderMap) -> Result<Session, SessionError> {
        let cookie = get_cookie_from_headers(headers, self.cookie_name())
            .ok_or(SessionError::Invalid)?;
        self.decode(&cookie)
    }

    /// Verifies a raw cookie value.
    pub fn decode(&self, cookie: &str) -> Result<Session, SessionError> {
        let payload = open(&self.config.secret, cookie)?;
        let session: Session = serde_json::from_slice(&payload).map_err(|e| {
            tracing::debug!("Signed session payload did not deserialize: {}", e);
            SessionError::Invalid
        })?;

        if session.is_expired() {
            tracing::debug!("Session expired at {}", session.expires_at);
            return Err(SessionError::Expired);
        }

        Ok(session)
    }

    /// Signs a session into its cookie value.
    pub fn encode(&self, session: &Session) -> Result<String, SessionError> {
        let payload =
            serde_json::to_vec(session).map_err(|e| SessionError::Cookie(e.to_string()))?;
        seal(&self.config.secret, &payload)
    }

    /// Stores a freshly generated CSRF token in the session.
    ///
    /// The previous token, if any, is replaced and stops validating once the
    /// returned session is persisted.
    pub fn mint_csrf_token(&self, session: &Session) -> Result<(CsrfToken, Session), SessionError> {
        let token = gen_random_string(CSRF_TOKEN_BYTES)?;
        let updated = Session {
            csrf_token: Some(token.clone()),
            ..session.clone()
        };
        Ok((CsrfToken::new(token), updated))
    }

    /// Marks the session as expired immediately.
    pub fn invalidate(&self, session: &Session) -> Session {
        Session {
            csrf_token: None,
            expires_at: Utc::now() - Duration::seconds(1),
            ..session.clone()
        }
    }

    /// Expired session for clients that never presented a valid one.
    pub fn expired(&self) -> Session {
        let now = Utc::now();
        Session {
            subject: SubjectId::Text(String::new()),
            csrf_token: None,
            issued_at: now,
            expires_at: now - Duration::seconds(1),
        }
    }

    /// `Set-Cookie` header carrying the signed session.
    ///
    /// Expired sessions are sent with `Max-Age=0` so that browsers drop them;
    /// a client replaying the value anyway gets [`SessionError::Expired`].
    pub fn set_cookie(&self, session: &Session) -> Result<HeaderMap, SessionError> {
        let value = self.encode(session)?;
        let remaining = (session.expires_at - Utc::now()).num_seconds().max(0);

        let mut headers = HeaderMap::new();
        header_set_cookie(
            &mut headers,
            self.cookie_name(),
            &value,
            CookieAttributes {
                max_age: remaining,
                secure: self.config.secure,
            },
        )?;
        Ok(headers)
    }

    fn max_age_secs(&self) -> i64 {
        self.config.max_age.min(MAX_SESSION_LIFETIME_SECS) as i64
    }
}
