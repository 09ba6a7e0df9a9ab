use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use serde_json::{Value, json};

use vulnlab::ProfileOutcome;
use vulnlab::authz::{OwnershipRejected, ProtectionMode};

use crate::error::{ErrorResponse, IntoResponseError};
use crate::json::LabJson;
use crate::session::AuthUser;
use crate::state::LabState;

pub(crate) fn router() -> Router<LabState> {
    Router::new().route("/profile", post(profile))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRequest {
    #[serde(default)]
    target_user_id: i64,
    #[serde(default)]
    secure: bool,
}

async fn profile(
    State(state): State<LabState>,
    user: AuthUser,
    LabJson(body): LabJson<ProfileRequest>,
) -> Result<Json<Value>, ErrorResponse> {
    let outcome = vulnlab::check_ownership(
        &state.store,
        &user.identity,
        body.target_user_id,
        ProtectionMode::from_secure_flag(body.secure),
    )
    .await
    .into_response_error()?;

    Ok(Json(match outcome {
        ProfileOutcome::Granted { decision, profile } => json!({
            "profile": profile,
            "requestedUserId": decision.requested_id,
            "effectiveUserId": decision.effective_id,
            "secure": body.secure,
        }),
        ProfileOutcome::Rejected(decision) => {
            let rejected = OwnershipRejected {
                requested_id: decision.requested_id,
            };
            json!({
                "error": "unauthorized",
                "message": rejected.to_string(),
                "requestedUserId": decision.requested_id,
                "effectiveUserId": null,
                "secure": body.secure,
            })
        }
    }))
}
