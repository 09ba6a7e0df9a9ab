//! Transport-agnostic lab operations.
//!
//! Every function here expects an already authenticated caller (an
//! [`IdentityContext`](crate::IdentityContext)) except `login` and `logout`.

mod account;
mod auth;
mod csrf;
mod errors;
mod idor;
mod types;

pub use account::{apply_account_mutation, get_account};
pub use auth::{login, logout, who_am_i};
pub use csrf::{change_email, get_profile_email, issue_csrf_token};
pub use errors::CoordinationError;
pub use idor::check_ownership;
pub use types::{MutationOutcome, ProfileOutcome};
