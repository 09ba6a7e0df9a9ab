use axum::{Json, extract::State};
use http::HeaderMap;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{ErrorResponse, IntoResponseError};
use crate::json::LabJson;
use crate::session::{AuthUser, session_cookie};
use crate::state::LabState;

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

pub(crate) async fn login(
    State(state): State<LabState>,
    LabJson(body): LabJson<LoginRequest>,
) -> Result<(HeaderMap, Json<Value>), ErrorResponse> {
    let (session, user_id) =
        vulnlab::login(&state.store, &state.manager, &body.username, &body.password)
            .await
            .into_response_error()?;

    let headers = session_cookie(&state, &session)?;

    Ok((
        headers,
        Json(json!({ "message": "login ok", "user_id": user_id })),
    ))
}

/// Always succeeds; clients without a session still get the expired cookie.
pub(crate) async fn logout(
    State(state): State<LabState>,
    user: Option<AuthUser>,
) -> Result<(HeaderMap, Json<Value>), ErrorResponse> {
    let session = vulnlab::logout(&state.manager, user.as_ref().map(|u| &u.session));
    let headers = session_cookie(&state, &session)?;

    Ok((headers, Json(json!({ "message": "logged out" }))))
}

pub(crate) async fn me(user: AuthUser) -> Json<Value> {
    Json(json!({ "user_id": vulnlab::who_am_i(&user.identity) }))
}
