//! Central configuration for the vulnlab_axum crate

use std::sync::LazyLock;

pub(crate) const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Frontend origin allowed to make credentialed cross-origin requests.
/// Default: "http://localhost:5173"
pub static LAB_ALLOWED_ORIGIN: LazyLock<String> = LazyLock::new(|| {
    allowed_origin_from(std::env::var("LAB_ALLOWED_ORIGIN").ok())
});

fn allowed_origin_from(value: Option<String>) -> String {
    value
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string())
}
