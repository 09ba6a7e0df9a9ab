use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{ErrorResponse, error_response};
use crate::json::{InvalidBody, LabJson};
use crate::state::LabState;

/// Not behind the auth gate.
pub(crate) fn router() -> Router<LabState> {
    Router::new()
        .route("/reflected", post(reflected))
        .route("/comment", post(add_comment))
        .route("/comments", get(list_comments))
}

// `secure` is accepted but ignored; the frontend decides how to render.
#[derive(Debug, Deserialize)]
struct ReflectedRequest {
    #[serde(default)]
    input: String,
}

#[derive(Debug, Deserialize)]
struct CommentRequest {
    #[serde(default)]
    content: String,
}

async fn reflected(LabJson(body): LabJson<ReflectedRequest>) -> Json<Value> {
    Json(json!({ "echo": body.input }))
}

async fn add_comment(
    State(state): State<LabState>,
    body: Result<LabJson<CommentRequest>, InvalidBody>,
) -> Result<(StatusCode, Json<Value>), ErrorResponse> {
    let content = body.map(|LabJson(b)| b.content).unwrap_or_default();
    let comment = state
        .comments
        .post(content)
        .await
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok((StatusCode::CREATED, Json(json!({ "id": comment.id }))))
}

async fn list_comments(State(state): State<LabState>) -> Json<Value> {
    Json(json!({ "comments": state.comments.snapshot().await }))
}
