use thiserror::Error;

use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// Cookie missing, malformed, or failing signature verification
    #[error("Invalid session")]
    Invalid,

    /// Signature is valid but the expiry marker is in the past
    #[error("Session expired")]
    Expired,

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

/// Reasons a stored subject cannot be turned into a user id.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Empty user id")]
    Empty,

    #[error("Non-numeric user id: {0}")]
    NonNumeric(String),

    #[error("User id is not an integer")]
    NotIntegral,

    #[error("User id out of range")]
    OutOfRange,
}
