use std::env;
use std::fmt;

use crate::session::errors::SessionError;
use crate::utils::gen_random_bytes;

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "session";
pub const DEFAULT_SESSION_COOKIE_MAX_AGE: u64 = 86400;

const MIN_SECRET_LEN: usize = 16;
const GENERATED_SECRET_LEN: usize = 32;

/// Key used to sign session cookies.
///
/// The bytes never leave this type: `Debug` is redacted and there is no
/// accessor outside the session module.
#[derive(Clone)]
pub struct SessionSecret(Vec<u8>);

impl SessionSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SessionError> {
        let bytes = bytes.into();
        if bytes.len() < MIN_SECRET_LEN {
            return Err(SessionError::Config(format!(
                "session secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        Ok(Self(bytes))
    }

    /// Random key for deployments that did not configure one.
    pub fn generate() -> Result<Self, SessionError> {
        Ok(Self(gen_random_bytes(GENERATED_SECRET_LEN)?))
    }

    pub(super) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(<redacted>)")
    }
}

/// Settings for the session manager, fixed at startup.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub max_age: u64,
    pub secure: bool,
    pub(super) secret: SessionSecret,
}

impl SessionConfig {
    pub fn new(secret: SessionSecret) -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            max_age: DEFAULT_SESSION_COOKIE_MAX_AGE,
            secure: false,
            secret,
        }
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn with_max_age(mut self, max_age: u64) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Reads `AUTH_SERVER_SECRET`, `SESSION_COOKIE_NAME`, `SESSION_COOKIE_MAX_AGE`
    /// and `SESSION_COOKIE_SECURE`.
    pub fn from_env() -> Result<Self, SessionError> {
        let secret = match env::var("AUTH_SERVER_SECRET") {
            Ok(secret) => SessionSecret::new(secret.into_bytes())?,
            Err(_) => {
                tracing::warn!(
                    "AUTH_SERVER_SECRET is not set; using a random key, sessions will not survive a restart"
                );
                SessionSecret::generate()?
            }
        };

        Ok(Self::new(secret)
            .with_cookie_name(parse_cookie_name(env::var("SESSION_COOKIE_NAME").ok()))
            .with_max_age(parse_max_age(env::var("SESSION_COOKIE_MAX_AGE").ok()))
            .with_secure(parse_secure(env::var("SESSION_COOKIE_SECURE").ok())))
    }
}

fn parse_cookie_name(value: Option<String>) -> String {
    value
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string())
}

fn parse_max_age(value: Option<String>) -> u64 {
    value
        .and_then(|s| s.parse().ok())
        .filter(|age| *age > 0)
        .unwrap_or(DEFAULT_SESSION_COOKIE_MAX_AGE)
}

fn parse_secure(value: Option<String>) -> bool {
    value.map(|val| val.to_lowercase() == "true").unwrap_or(false)
}
