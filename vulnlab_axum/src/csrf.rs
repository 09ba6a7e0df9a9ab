use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_extra::TypedHeader;
use http::HeaderMap;
use serde::Deserialize;
use serde_json::{Value, json};

use vulnlab::MutationOutcome;
use vulnlab::authz::ProtectionMode;

use crate::csrf_header::{XCsrfToken, supplied_token};
use crate::error::{ErrorResponse, IntoResponseError};
use crate::json::LabJson;
use crate::session::{AuthUser, session_cookie};
use crate::state::LabState;

pub(crate) fn router() -> Router<LabState> {
    Router::new()
        .route("/token", get(token))
        .route("/profile", get(profile))
        .route("/change-email", post(change_email))
}

/// Mints a new token and sends the updated session back with it.
async fn token(
    State(state): State<LabState>,
    user: AuthUser,
) -> Result<(HeaderMap, Json<Value>), ErrorResponse> {
    let (token, session) =
        vulnlab::issue_csrf_token(&state.manager, &user.session).into_response_error()?;
    let headers = session_cookie(&state, &session)?;

    Ok((headers, Json(json!({ "token": token.as_str() }))))
}

async fn profile(
    State(state): State<LabState>,
    user: AuthUser,
) -> Result<Json<Value>, ErrorResponse> {
    let email = vulnlab::get_profile_email(&state.store, &user.identity)
        .await
        .into_response_error()?;
    Ok(Json(json!({ "email": email })))
}

#[derive(Debug, Deserialize)]
struct ChangeEmailRequest {
    #[serde(default)]
    email: String,
    token: Option<String>,
    #[serde(default)]
    secure: bool,
}

async fn change_email(
    State(state): State<LabState>,
    user: AuthUser,
    header: Option<TypedHeader<XCsrfToken>>,
    LabJson(body): LabJson<ChangeEmailRequest>,
) -> Result<Json<Value>, ErrorResponse> {
    let header = header.map(|TypedHeader(h)| h);
    let supplied = supplied_token(body.token.as_deref(), header.as_ref());

    let outcome = vulnlab::change_email(
        &state.store,
        &user.identity,
        &user.session,
        &body.email,
        ProtectionMode::from_secure_flag(body.secure),
        supplied,
    )
    .await
    .into_response_error()?;

    Ok(Json(match outcome {
        MutationOutcome::Applied(email) => json!({ "email": email }),
        MutationOutcome::CsrfRejected => json!({ "error": "invalid CSRF token" }),
    }))
}
