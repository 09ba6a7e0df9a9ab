use thiserror::Error;

use crate::session::{IdentityContext, UserId};

use super::types::ProtectionMode;

/// Outcome of the ownership check for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipDecision {
    pub requested_id: UserId,
    /// The record the caller may actually read. `None` means rejected.
    pub effective_id: Option<UserId>,
    pub mode: ProtectionMode,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("secure mode: you may only access your own profile")]
pub struct OwnershipRejected {
    pub requested_id: UserId,
}

/// Grants access only to the caller's own record.
pub fn protected_decision(identity: &IdentityContext, requested_id: UserId) -> OwnershipDecision {
    let effective_id = (requested_id == identity.user_id()).then_some(identity.user_id());
    if effective_id.is_none() {
        tracing::warn!(
            user_id = %identity.user_id(),
            requested_id = %requested_id,
            "Ownership check refused cross-user access"
        );
    }
    OwnershipDecision {
        requested_id,
        effective_id,
        mode: ProtectionMode::Protected,
    }
}

/// Trusts the client-supplied target.
pub fn unprotected_decision(identity: &IdentityContext, requested_id: UserId) -> OwnershipDecision {
    if requested_id != identity.user_id() {
        tracing::warn!(
            user_id = %identity.user_id(),
            requested_id = %requested_id,
            "Unprotected ownership check granting cross-user access"
        );
    }
    OwnershipDecision {
        requested_id,
        effective_id: Some(requested_id),
        mode: ProtectionMode::Unprotected,
    }
}

pub fn decide(
    mode: ProtectionMode,
    identity: &IdentityContext,
    requested_id: UserId,
) -> OwnershipDecision {
    match mode {
        ProtectionMode::Protected => protected_decision(identity, requested_id),
        ProtectionMode::Unprotected => unprotected_decision(identity, requested_id),
    }
}

impl OwnershipDecision {
    /// Converts the decision into the id to load, or the rejection.
    pub fn into_result(self) -> Result<UserId, OwnershipRejected> {
        self.effective_id.ok_or(OwnershipRejected {
            requested_id: self.requested_id,
        })
    }
}
