//! vulnlab - session authentication and authorization core for a web-security lab
//!
//! Every lab feature has a protected and an unprotected path. This crate holds
//! the parts both paths share: signed cookie sessions, the auth gate that turns
//! a session into an [`IdentityContext`], the CSRF guard, the authorization
//! decision points and the credential store. Transport lives in `vulnlab_axum`.

pub mod authz;
mod config;
mod coordination;
pub mod lab;
mod session;
mod storage;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::LAB_ROUTE_PREFIX;

pub use coordination::{
    CoordinationError, MutationOutcome, ProfileOutcome, apply_account_mutation, change_email,
    check_ownership, get_account, get_profile_email, issue_csrf_token, login, logout, who_am_i,
};

pub use session::{
    AuthRejected, AuthenticatedSession, CsrfRejected, CsrfToken,
    DEFAULT_SESSION_COOKIE_MAX_AGE, DEFAULT_SESSION_COOKIE_NAME, IdentityContext, IdentityError,
    Session, SessionConfig, SessionError, SessionManager, SessionSecret, SubjectId, UserId,
    authenticate, csrf_guard, normalize_user_id, verify_csrf_token,
};

pub use storage::{
    Account, DEFAULT_DATA_STORE_URL, LabStore, Profile, StorageError, StoreConfig, StoreType,
    UserRow,
};

pub use utils::UtilError;
