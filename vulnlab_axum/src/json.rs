use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use http::StatusCode;

use crate::error::error_response;

/// `axum::Json` with the lab's error shape on rejection.
///
/// Syntax errors, type mismatches, missing fields and a wrong content type
/// all answer 400 `{"error": "invalid body"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabJson<T>(pub T);

#[derive(Debug)]
pub struct InvalidBody(JsonRejection);

impl IntoResponse for InvalidBody {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected request body: {}", self.0.body_text());
        error_response(StatusCode::BAD_REQUEST, "invalid body").into_response()
    }
}

impl<S, T> FromRequest<S> for LabJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = InvalidBody;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| LabJson(value))
            .map_err(InvalidBody)
    }
}
