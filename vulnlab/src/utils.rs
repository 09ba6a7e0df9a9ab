use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use http::header::{HeaderMap, SET_COOKIE};
use ring::rand::SecureRandom;
use thiserror::Error;

pub(crate) fn base64url_decode(input: &str) -> Result<Vec<u8>, UtilError> {
    let decoded = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|_| UtilError::Format("Failed to decode base64url".to_string()))?;
    Ok(decoded)
}

pub(crate) fn base64url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

pub(crate) fn gen_random_bytes(len: usize) -> Result<Vec<u8>, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random bytes".to_string()))?;
    Ok(bytes)
}

/// Generates `len` random bytes from the OS and returns them base64url encoded.
pub(crate) fn gen_random_string(len: usize) -> Result<String, UtilError> {
    Ok(base64url_encode(&gen_random_bytes(len)?))
}

/// Attributes shared by every cookie the lab sets.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CookieAttributes {
    pub(crate) max_age: i64,
    pub(crate) secure: bool,
}

pub(crate) fn render_set_cookie(name: &str, value: &str, attrs: CookieAttributes) -> String {
    let mut cookie = format!(
        "{name}={value}; SameSite=Lax; HttpOnly; Path=/; Max-Age={}",
        attrs.max_age
    );
    if attrs.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub(crate) fn header_set_cookie<'a>(
    headers: &'a mut HeaderMap,
    name: &str,
    value: &str,
    attrs: CookieAttributes,
) -> Result<&'a HeaderMap, UtilError> {
    let cookie = render_set_cookie(name, value, attrs);
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(headers)
}

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Invalid format: {0}")]
    Format(String),
}
