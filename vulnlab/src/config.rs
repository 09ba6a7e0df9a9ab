//! Central configuration for the vulnlab crate

use std::sync::LazyLock;

const DEFAULT_ROUTE_PREFIX: &str = "/api";

/// Route prefix under which all lab endpoints are mounted.
///
/// Default: "/api"
pub static LAB_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| route_prefix_from(std::env::var("LAB_ROUTE_PREFIX").ok()));

/// Always yields a non-empty path starting with `/` and without a trailing `/`,
/// since the router nests under it.
fn route_prefix_from(value: Option<String>) -> String {
    let prefix = value
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ROUTE_PREFIX.to_string());

    if prefix.starts_with('/') {
        prefix
    } else {
        format!("/{prefix}")
    }
}
