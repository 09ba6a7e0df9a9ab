use headers::{Cookie, HeaderMapExt};
use http::HeaderMap;

/// Returns the value of the named cookie from the request headers.
pub(super) fn get_cookie_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let Some(cookies) = headers.typed_get::<Cookie>() else {
        tracing::debug!("No cookie header found");
        return None;
    };

    let value = cookies.get(cookie_name).map(str::to_string);
    if value.is_none() {
        tracing::debug!("No session cookie '{}' found in cookies", cookie_name);
    }
    value
}
