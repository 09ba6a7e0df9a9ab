//! Combined router for all lab endpoints

use axum::{Json, Router, middleware::from_fn_with_state, routing::get, routing::post};
use http::{HeaderName, HeaderValue, Method, header};
use serde_json::{Value, json};
use tower_http::LatencyUnit;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use vulnlab::LAB_ROUTE_PREFIX;

use crate::config::{DEFAULT_ALLOWED_ORIGIN, LAB_ALLOWED_ORIGIN};
use crate::middleware::require_auth;
use crate::state::LabState;

/// Create the lab router with CORS and HTTP tracing
///
/// Everything is mounted under `LAB_ROUTE_PREFIX` (default `/api`). Routes are
/// split into two explicit groups: the gated group runs [`require_auth`]
/// before any handler, the open group does not.
///
/// Open:
/// - GET  {prefix}/health
/// - POST {prefix}/auth/login, {prefix}/auth/logout
/// - POST {prefix}/xss/reflected, {prefix}/xss/comment; GET {prefix}/xss/comments
///
/// Gated:
/// - GET  {prefix}/auth/me
/// - {prefix}/csrf/..., {prefix}/idor/..., {prefix}/mass/..., {prefix}/sqli/..., {prefix}/ssrf/...
pub fn lab_router(state: LabState) -> Router {
    lab_router_no_trace(state)
        .layer(cors_layer(LAB_ALLOWED_ORIGIN.as_str()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}

/// Same routes as [`lab_router`] without the CORS and tracing layers.
pub fn lab_router_no_trace(state: LabState) -> Router {
    let gated = Router::new()
        .route("/auth/me", get(super::auth::me))
        .nest("/csrf", super::csrf::router())
        .nest("/idor", super::idor::router())
        .nest("/mass", super::mass::router())
        .nest("/sqli", super::sqli::router())
        .nest("/ssrf", super::ssrf::router())
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let open = Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(super::auth::login))
        .route("/auth/logout", post(super::auth::logout))
        .nest("/xss", super::xss::router());

    Router::new()
        .nest(LAB_ROUTE_PREFIX.as_str(), open.merge(gated))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let origin = HeaderValue::from_str(origin).unwrap_or_else(|_| {
        tracing::warn!(
            "LAB_ALLOWED_ORIGIN is not a valid header value; using {}",
            DEFAULT_ALLOWED_ORIGIN
        );
        HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN)
    });

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-csrf-token"),
        ])
}
