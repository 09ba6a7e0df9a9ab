use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::authz::ProtectionMode;
use crate::storage::{LabStore, StoreType, UserRow};

/// Artificial delay on the unprotected path for time-based payloads.
const TIME_BASED_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SqliRequest {
    #[serde(default)]
    pub term: String,
    /// Payload family the client is demonstrating: error, boolean, time, union, oob.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub secure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqliReport {
    pub secure: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub query: String,
    /// Raw database error, only for error-based requests.
    pub error: String,
    pub row_count: usize,
    pub elapsed_ms: u128,
    pub results: Vec<UserRow>,
}

fn like_operator(store_type: StoreType) -> &'static str {
    match store_type {
        StoreType::Sqlite => "LIKE",
        StoreType::Postgres => "ILIKE",
    }
}

/// Builds the query text for the given mode. The protected query takes the
/// term as its only bind parameter; the unprotected one embeds it.
pub fn build_query(store_type: StoreType, term: &str, mode: ProtectionMode) -> String {
    let op = like_operator(store_type);
    match (mode, store_type) {
        (ProtectionMode::Unprotected, _) => {
            format!("SELECT id, username FROM users WHERE username {op} '%{term}%'")
        }
        (ProtectionMode::Protected, StoreType::Sqlite) => {
            format!("SELECT id, username FROM users WHERE username {op} '%' || ? || '%'")
        }
        (ProtectionMode::Protected, StoreType::Postgres) => {
            format!("SELECT id, username FROM users WHERE username {op} '%' || $1 || '%'")
        }
    }
}

/// Runs the username search. Database failures are reported inside the
/// result, never as an error.
#[tracing::instrument(skip(store, request), fields(kind = %request.kind, secure = request.secure))]
pub async fn search(store: &LabStore, request: &SqliRequest) -> SqliReport {
    let mode = ProtectionMode::from_secure_flag(request.secure);
    let start = Instant::now();

    if mode == ProtectionMode::Unprotected && request.kind == "time" {
        tokio::time::sleep(TIME_BASED_DELAY).await;
    }

    let query = build_query(store.store_type(), &request.term, mode);
    let bind = mode.is_protected().then_some(request.term.as_str());

    let (results, error) = match store.search_users(&query, bind).await {
        Ok(rows) => (rows, String::new()),
        Err(e) => {
            tracing::warn!(error = %e, "Search query failed");
            let error = if request.kind == "error" {
                e.to_string()
            } else {
                String::new()
            };
            (Vec::new(), error)
        }
    };

    SqliReport {
        secure: request.secure,
        kind: request.kind.clone(),
        query,
        error,
        row_count: results.len(),
        elapsed_ms: start.elapsed().as_millis(),
        results,
    }
}
