use axum::{Json, Router, extract::State, routing::post};

use vulnlab::lab::{SqliReport, SqliRequest, sqli};

use crate::json::LabJson;
use crate::session::AuthUser;
use crate::state::LabState;

pub(crate) fn router() -> Router<LabState> {
    Router::new().route("/search", post(search))
}

/// Always 200; query failures travel inside the report.
async fn search(
    State(state): State<LabState>,
    user: AuthUser,
    LabJson(body): LabJson<SqliRequest>,
) -> Json<SqliReport> {
    tracing::debug!(user_id = %user.user_id(), "SQLi search");
    Json(sqli::search(&state.store, &body).await)
}
