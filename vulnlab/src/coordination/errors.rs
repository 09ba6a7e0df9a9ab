use thiserror::Error;

use crate::session::{AuthRejected, SessionError};
use crate::storage::StorageError;

/// Errors surfaced by the coordination layer.
///
/// Protected-mode refusals (CSRF, ownership) are not errors; they are
/// returned as outcomes so the transport can render them as regular payloads.
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Unknown username or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Auth gate rejection
    #[error("{0}")]
    Unauthorized(AuthRejected),

    /// Malformed or out-of-range request payload
    #[error("{0}")]
    Validation(String),

    /// The authenticated user has no row for the requested record
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    #[error("Session error: {0}")]
    SessionError(SessionError),

    #[error("Storage error: {0}")]
    StorageError(StorageError),
}

impl CoordinationError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::InvalidCredentials => tracing::warn!("Invalid credentials"),
            Self::Unauthorized(reason) => tracing::debug!("Unauthorized: {}", reason),
            Self::Validation(msg) => tracing::debug!("Validation error: {}", msg),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::warn!("Resource not found: {} {}", resource_type, resource_id),
            Self::SessionError(err) => tracing::error!("Session error: {}", err),
            Self::StorageError(err) => tracing::error!("Storage error: {}", err),
        }
        self
    }

    pub(crate) fn not_found(resource_type: &str, resource_id: impl ToString) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
        }
    }
}

// Conversions from lower layers log once, here.

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = Self::SessionError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<StorageError> for CoordinationError {
    fn from(err: StorageError) -> Self {
        let error = Self::StorageError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<AuthRejected> for CoordinationError {
    fn from(err: AuthRejected) -> Self {
        let error = Self::Unauthorized(err);
        tracing::debug!("{}", error);
        error
    }
}
