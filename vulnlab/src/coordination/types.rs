use crate::authz::OwnershipDecision;
use crate::storage::Profile;

/// Result of a mutation guarded by the CSRF check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome<T> {
    Applied(T),
    /// Protected request without the session's current token; nothing was written.
    CsrfRejected,
}

impl<T> MutationOutcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Result of the profile lookup behind the ownership check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    Granted {
        decision: OwnershipDecision,
        profile: Profile,
    },
    Rejected(OwnershipDecision),
}

impl ProfileOutcome {
    pub fn decision(&self) -> &OwnershipDecision {
        match self {
            Self::Granted { decision, .. } | Self::Rejected(decision) => decision,
        }
    }
}
