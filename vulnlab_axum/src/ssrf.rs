use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use serde_json::{Value, json};

use vulnlab::authz::ProtectionMode;

use crate::json::LabJson;
use crate::session::AuthUser;
use crate::state::LabState;

pub(crate) fn router() -> Router<LabState> {
    Router::new().route("/fetch", post(fetch))
}

#[derive(Debug, Deserialize)]
struct FetchRequest {
    #[serde(default)]
    url: String,
    #[serde(default)]
    secure: bool,
}

/// Always 200; refusals and transport failures are reported as `{"error": ...}`.
async fn fetch(
    State(state): State<LabState>,
    user: AuthUser,
    LabJson(body): LabJson<FetchRequest>,
) -> Json<Value> {
    let mode = ProtectionMode::from_secure_flag(body.secure);
    match state.fetcher.fetch(&body.url, mode).await {
        Ok(report) => Json(json!(report)),
        Err(e) => {
            tracing::info!(user_id = %user.user_id(), error = %e, "Fetch refused or failed");
            Json(json!({ "error": e.to_string() }))
        }
    }
}
