use axum_extra::headers::{self, Header, HeaderName, HeaderValue};

static X_CSRF_TOKEN: HeaderName = HeaderName::from_static("x-csrf-token");

/// `X-CSRF-Token` request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XCsrfToken(pub String);

impl Header for XCsrfToken {
    fn name() -> &'static HeaderName {
        &X_CSRF_TOKEN
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        let token = value.to_str().map_err(|_| headers::Error::invalid())?;
        Ok(Self(token.to_string()))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            values.extend(std::iter::once(value));
        }
    }
}

/// Picks the token to verify: the body field when present, the header otherwise.
pub(crate) fn supplied_token<'a>(
    body: Option<&'a str>,
    header: Option<&'a XCsrfToken>,
) -> Option<&'a str> {
    body.or_else(|| header.map(|h| h.0.as_str()))
}
