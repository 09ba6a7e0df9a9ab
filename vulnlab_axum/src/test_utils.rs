use http::{HeaderValue, header::COOKIE, request::Parts};

use vulnlab::{LabStore, Session, SessionConfig, SessionManager, SessionSecret, StoreConfig};

use crate::state::LabState;

pub(crate) async fn test_state() -> LabState {
    let secret = SessionSecret::new("axum-unit-test-signing-secret".as_bytes())
        .expect("test secret is long enough");
    let store = LabStore::connect(&StoreConfig::in_memory())
        .await
        .expect("in-memory store should initialize");
    LabState::new(SessionManager::new(SessionConfig::new(secret)), store)
        .expect("fetcher should build")
}

pub(crate) fn cookie_request_parts(state: &LabState, session: &Session) -> Parts {
    let value = state.manager.encode(session).expect("session should encode");
    let (mut parts, _) = http::Request::new(()).into_parts();
    parts.headers.insert(
        COOKIE,
        HeaderValue::from_str(&format!("{}={value}", state.manager.cookie_name()))
            .expect("cookie header should be valid"),
    );
    parts
}
