//! vulnlab_axum - Axum transport for the vulnlab session and authorization core
//!
//! Mount [`lab_router`] with a [`LabState`] to expose the lab's JSON API.
//! The auth gate is [`require_auth`] as a route layer plus the [`AuthUser`]
//! extractor.

mod auth;
mod config;
mod csrf;
mod csrf_header;
mod error;
mod idor;
mod json;
mod mass;
mod middleware;
mod router;
mod session;
mod sqli;
mod ssrf;
mod state;
mod xss;

#[cfg(test)]
mod test_utils;

pub use config::LAB_ALLOWED_ORIGIN;
pub use csrf_header::XCsrfToken;
pub use error::{ErrorResponse, IntoResponseError};
pub use json::{InvalidBody, LabJson};
pub use middleware::require_auth;
pub use router::{lab_router, lab_router_no_trace};
pub use session::{AuthRejection, AuthUser};
pub use state::LabState;

pub use vulnlab::{LAB_ROUTE_PREFIX, LabStore, SessionConfig, SessionManager, StoreConfig};
