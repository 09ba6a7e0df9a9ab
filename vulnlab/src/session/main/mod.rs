mod cookie;
mod csrf;
mod gate;
mod identity;
mod session;
mod signing;

pub use csrf::{CsrfRejected, csrf_guard, issue_csrf_token, verify_csrf_token};
pub use gate::{AuthRejected, AuthenticatedSession, authenticate};
pub use identity::normalize_user_id;
pub use session::SessionManager;
