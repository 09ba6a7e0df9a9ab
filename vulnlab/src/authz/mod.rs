//! Authorization decision points.
//!
//! Each point has a protected and an unprotected decision function; callers
//! pick one with `decide` based on the request's [`ProtectionMode`]. Decisions
//! take the caller's identity from the [`IdentityContext`](crate::IdentityContext),
//! never from the payload.

pub mod account;
pub mod ownership;
mod types;

pub use account::{AccountChanges, AccountUpdate};
pub use ownership::{OwnershipDecision, OwnershipRejected};
pub use types::ProtectionMode;
