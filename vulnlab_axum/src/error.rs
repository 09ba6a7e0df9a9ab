use axum::Json;
use http::StatusCode;
use serde_json::{Value, json};
use vulnlab::CoordinationError;

/// Error payload every route answers with: `{"error": "..."}`.
pub type ErrorResponse = (StatusCode, Json<Value>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (status, Json(json!({ "error": message.into() })))
}

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ErrorResponse>;
}

/// Store and session failures are reported as a generic "internal error";
/// the details only go to the log.
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|e| match e {
            CoordinationError::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, e.to_string())
            }
            CoordinationError::Unauthorized(_) => {
                error_response(StatusCode::UNAUTHORIZED, e.to_string())
            }
            CoordinationError::Validation(_) => {
                error_response(StatusCode::BAD_REQUEST, e.to_string())
            }
            CoordinationError::ResourceNotFound { .. } => {
                error_response(StatusCode::NOT_FOUND, "not found")
            }
            CoordinationError::SessionError(_) | CoordinationError::StorageError(_) => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        })
    }
}
