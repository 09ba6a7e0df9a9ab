//! Shared helpers for unit tests across the crate.
//!
//! Each call to [`seeded_store`] opens its own in-memory SQLite database, so
//! tests never see each other's writes.

use http::HeaderMap;
use http::HeaderValue;
use http::header::COOKIE;

use crate::session::{
    IdentityContext, Session, SessionConfig, SessionManager, SessionSecret, UserId,
};
use crate::storage::{LabStore, StoreConfig};

pub(crate) const TEST_SECRET: &str = "unit-test-signing-secret-0123456789";

pub(crate) async fn seeded_store() -> LabStore {
    LabStore::connect(&StoreConfig::in_memory())
        .await
        .expect("in-memory store should initialize")
}

pub(crate) fn test_manager() -> SessionManager {
    let secret = SessionSecret::new(TEST_SECRET.as_bytes()).expect("test secret is long enough");
    SessionManager::new(SessionConfig::new(secret))
}

/// Request headers carrying `session` as the session cookie.
pub(crate) fn session_headers(manager: &SessionManager, session: &Session) -> HeaderMap {
    let value = manager.encode(session).expect("session should encode");
    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        HeaderValue::from_str(&format!("{}={value}", manager.cookie_name()))
            .expect("cookie header should be valid"),
    );
    headers
}

/// A fresh session for `user_id` together with the identity the gate derives from it.
pub(crate) fn authenticated(manager: &SessionManager, user_id: UserId) -> (Session, IdentityContext) {
    (manager.create(user_id), IdentityContext::new(user_id))
}
