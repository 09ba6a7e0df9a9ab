use serde::Deserialize;

use crate::session::{IdentityContext, UserId};

use super::types::ProtectionMode;

/// Client-supplied account update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountUpdate {
    pub plan: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Fields the store is allowed to write for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountChanges {
    pub user_id: UserId,
    pub plan: String,
    /// `None` leaves the privilege flag untouched.
    pub is_admin: Option<bool>,
    pub mode: ProtectionMode,
}

/// Applies `plan` only; the privilege flag is server-controlled.
pub fn protected_decision(identity: &IdentityContext, update: AccountUpdate) -> AccountChanges {
    if update.is_admin {
        tracing::warn!(
            user_id = %identity.user_id(),
            "Dropping client-supplied is_admin from protected account update"
        );
    }
    AccountChanges {
        user_id: identity.user_id(),
        plan: update.plan,
        is_admin: None,
        mode: ProtectionMode::Protected,
    }
}

/// Applies every field the client sent.
pub fn unprotected_decision(identity: &IdentityContext, update: AccountUpdate) -> AccountChanges {
    tracing::warn!(
        user_id = %identity.user_id(),
        is_admin = update.is_admin,
        "Unprotected account update writes client-supplied is_admin"
    );
    AccountChanges {
        user_id: identity.user_id(),
        plan: update.plan,
        is_admin: Some(update.is_admin),
        mode: ProtectionMode::Unprotected,
    }
}

pub fn decide(
    mode: ProtectionMode,
    identity: &IdentityContext,
    update: AccountUpdate,
) -> AccountChanges {
    match mode {
        ProtectionMode::Protected => protected_decision(identity, update),
        ProtectionMode::Unprotected => unprotected_decision(identity, update),
    }
}
