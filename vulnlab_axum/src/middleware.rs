use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use vulnlab::authenticate;

use crate::session::AuthRejection;
use crate::state::LabState;

/// The auth gate as a route layer.
///
/// Rejects the request with 401 before any handler work when the session is
/// missing, tampered, expired or carries an unusable user id. Otherwise the
/// [`AuthenticatedSession`](vulnlab::AuthenticatedSession) is stored in the
/// request extensions for [`AuthUser`](crate::AuthUser).
pub async fn require_auth(State(state): State<LabState>, mut req: Request, next: Next) -> Response {
    match authenticate(&state.manager, req.headers()) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(err) => AuthRejection(err).into_response(),
    }
}
