use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Response},
};
use http::{HeaderMap, StatusCode, request::Parts};

use vulnlab::{
    AuthRejected, AuthenticatedSession, CoordinationError, IdentityContext, Session, UserId,
    authenticate,
};

use crate::error::{ErrorResponse, IntoResponseError, error_response};
use crate::state::LabState;

/// `Set-Cookie` headers carrying `session` back to the client.
pub(crate) fn session_cookie(state: &LabState, session: &Session) -> Result<HeaderMap, ErrorResponse> {
    state
        .manager
        .set_cookie(session)
        .map_err(CoordinationError::from)
        .into_response_error()
}

/// 401 answer for requests that did not pass the auth gate.
#[derive(Debug)]
pub struct AuthRejection(pub AuthRejected);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        tracing::debug!("Unauthorized: {:?}", self.0);
        error_response(StatusCode::UNAUTHORIZED, self.0.to_string()).into_response()
    }
}

impl From<AuthRejected> for AuthRejection {
    fn from(err: AuthRejected) -> Self {
        Self(err)
    }
}

/// Authenticated caller, available as an Axum extractor
///
/// Routes behind [`require_auth`](crate::require_auth) find the gate's result
/// in the request extensions; anywhere else the extractor runs the gate
/// itself. Either way a handler taking `AuthUser` never runs for an
/// unauthenticated request.
///
/// # Example
///
/// ```no_run
/// use axum::Json;
/// use serde_json::{Value, json};
/// use vulnlab_axum::AuthUser;
///
/// async fn whoami(user: AuthUser) -> Json<Value> {
///     Json(json!({ "user_id": user.user_id() }))
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub identity: IdentityContext,
    /// The verified session, needed to mint or check CSRF tokens.
    pub session: Session,
}

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.identity.user_id()
    }
}

impl From<AuthenticatedSession> for AuthUser {
    fn from(auth: AuthenticatedSession) -> Self {
        Self {
            identity: auth.identity,
            session: auth.session,
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    LabState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<AuthenticatedSession>() {
            return Ok(auth.clone().into());
        }

        let state = LabState::from_ref(state);
        Ok(authenticate(&state.manager, &parts.headers)?.into())
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    LabState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <AuthUser as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(user) => Ok(Some(user)),
            Err(_) => Ok(None),
        }
    }
}
