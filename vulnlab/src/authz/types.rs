use std::fmt;

/// Which branch of a paired operation a request takes.
///
/// Requests carry this as a `secure` boolean; `true` selects the protected
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtectionMode {
    Protected,
    Unprotected,
}

impl ProtectionMode {
    pub const fn from_secure_flag(secure: bool) -> Self {
        if secure {
            Self::Protected
        } else {
            Self::Unprotected
        }
    }

    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Protected)
    }

    pub const fn as_secure_flag(self) -> bool {
        self.is_protected()
    }
}

impl From<bool> for ProtectionMode {
    fn from(secure: bool) -> Self {
        Self::from_secure_flag(secure)
    }
}

impl fmt::Display for ProtectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protected => write!(f, "protected"),
            Self::Unprotected => write!(f, "unprotected"),
        }
    }
}
