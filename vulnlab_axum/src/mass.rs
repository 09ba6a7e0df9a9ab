use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_extra::TypedHeader;
use serde::Deserialize;
use serde_json::{Value, json};

use vulnlab::MutationOutcome;
use vulnlab::authz::{AccountUpdate, ProtectionMode};

use crate::csrf_header::{XCsrfToken, supplied_token};
use crate::error::{ErrorResponse, IntoResponseError};
use crate::json::LabJson;
use crate::session::AuthUser;
use crate::state::LabState;

pub(crate) fn router() -> Router<LabState> {
    Router::new()
        .route("/update", post(update))
        .route("/me", get(me))
}

#[derive(Debug, Deserialize)]
struct UpdateRequest {
    #[serde(flatten)]
    update: AccountUpdate,
    token: Option<String>,
    #[serde(default)]
    secure: bool,
}

async fn update(
    State(state): State<LabState>,
    user: AuthUser,
    header: Option<TypedHeader<XCsrfToken>>,
    LabJson(body): LabJson<UpdateRequest>,
) -> Result<Json<Value>, ErrorResponse> {
    let header = header.map(|TypedHeader(h)| h);
    let supplied = supplied_token(body.token.as_deref(), header.as_ref());

    let outcome = vulnlab::apply_account_mutation(
        &state.store,
        &user.identity,
        &user.session,
        body.update,
        ProtectionMode::from_secure_flag(body.secure),
        supplied,
    )
    .await
    .into_response_error()?;

    Ok(Json(match outcome {
        MutationOutcome::Applied(account) => json!(account),
        MutationOutcome::CsrfRejected => json!({ "error": "invalid CSRF token" }),
    }))
}

async fn me(State(state): State<LabState>, user: AuthUser) -> Result<Json<Value>, ErrorResponse> {
    let account = vulnlab::get_account(&state.store, &user.identity)
        .await
        .into_response_error()?;
    Ok(Json(json!(account)))
}
