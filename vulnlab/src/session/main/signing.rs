//! HMAC-SHA256 sealing of session payloads.
//!
//! Wire form is `base64url(payload) "." base64url(tag)`. The tag covers the
//! encoded payload so that a client can read but never alter the session.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::session::{config::SessionSecret, errors::SessionError};
use crate::utils::{base64url_decode, base64url_encode};

type HmacSha256 = Hmac<Sha256>;

fn mac_for(secret: &SessionSecret, encoded_payload: &str) -> Result<HmacSha256, SessionError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| SessionError::Crypto(e.to_string()))?;
    mac.update(encoded_payload.as_bytes());
    Ok(mac)
}

pub(super) fn seal(secret: &SessionSecret, payload: &[u8]) -> Result<String, SessionError> {
    let encoded_payload = base64url_encode(payload);
    let tag = mac_for(secret, &encoded_payload)?.finalize().into_bytes();
    Ok(format!("{encoded_payload}.{}", base64url_encode(&tag)))
}

/// Verifies the tag and returns the raw payload bytes.
pub(super) fn open(secret: &SessionSecret, sealed: &str) -> Result<Vec<u8>, SessionError> {
    let (encoded_payload, encoded_tag) = sealed.split_once('.').ok_or_else(|| {
        tracing::debug!("Session cookie has no signature separator");
        SessionError::Invalid
    })?;

    let tag = base64url_decode(encoded_tag).map_err(|_| SessionError::Invalid)?;

    mac_for(secret, encoded_payload)?
        .verify_slice(&tag)
        .map_err(|_| {
            tracing::debug!("Session cookie signature mismatch");
            SessionError::Invalid
        })?;

    base64url_decode(encoded_payload).map_err(|_| SessionError::Invalid)
}
