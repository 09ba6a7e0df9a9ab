use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated user identifier. Only the auth gate produces these from session data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity as it was stored in the session payload.
///
/// Depending on who wrote the cookie the subject can be a JSON integer, a
/// float, or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectId {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<UserId> for SubjectId {
    fn from(id: UserId) -> Self {
        SubjectId::Integer(id.get())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub(crate) fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Session record carried by the client cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "uid")]
    pub(crate) subject: SubjectId,
    #[serde(rename = "csrf", default, skip_serializing_if = "Option::is_none")]
    pub(crate) csrf_token: Option<String>,
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub(crate) issued_at: DateTime<Utc>,
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub(crate) expires_at: DateTime<Utc>,
}

impl Session {
    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Authenticated identity for the lifetime of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityContext {
    user_id: UserId,
}

impl IdentityContext {
    pub(crate) fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
