mod config;
mod errors;
mod main;
mod types;

pub use config::{
    DEFAULT_SESSION_COOKIE_MAX_AGE, DEFAULT_SESSION_COOKIE_NAME, SessionConfig, SessionSecret,
};
pub use errors::{IdentityError, SessionError};
pub use main::{
    AuthRejected, AuthenticatedSession, CsrfRejected, SessionManager, authenticate, csrf_guard,
    issue_csrf_token, normalize_user_id, verify_csrf_token,
};
pub use types::{CsrfToken, IdentityContext, Session, SubjectId, UserId};
