//! Error types for authorization checks

use std::fmt;

use thiserror::Error;

use aspire_interfaces::StoreError;
use aspire_types::{Permission, Role};

/// Result type for authorization checks
pub type AuthResult<T> = Result<T, AuthError>;

/// Authorization failure kinds.
///
/// `Unauthenticated` and `Forbidden` are expected, frequent outcomes and are
/// handled entirely at the guard boundary. `SessionStoreUnavailable` means
/// the check itself could not run; callers must fail closed on it and surface
/// it as a 5xx-class failure, distinct from 401/403.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No valid session could be resolved for the request
    #[error("authentication required")]
    Unauthenticated,

    /// Valid session, but the stated requirement was not met
    #[error("access denied: {reason}")]
    Forbidden { reason: DenialReason },

    /// The session or user store could not answer within the timeout
    #[error("session store unavailable: {message}")]
    SessionStoreUnavailable { message: String },
}

impl AuthError {
    /// Create a new forbidden error
    pub fn forbidden(reason: DenialReason) -> Self {
        Self::Forbidden { reason }
    }

    /// Create a new store-unavailable error
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::SessionStoreUnavailable {
            message: message.into(),
        }
    }

    /// Check if this is an unauthenticated error
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if this is a forbidden error
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        Self::SessionStoreUnavailable {
            message: err.to_string(),
        }
    }
}

/// Why an authenticated request was refused.
///
/// Carried for server-side logs; responses show a generic message instead, so
/// a requester cannot enumerate which role or permission would have sufficed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    InsufficientRole { required: Role },
    MissingPermission { permission: Permission },
    AdminRequired,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::InsufficientRole { required } => {
                write!(f, "requires role {} or above", required)
            }
            DenialReason::MissingPermission { permission } => {
                write!(f, "missing permission {}", permission)
            }
            DenialReason::AdminRequired => write!(f, "requires an administrative role"),
        }
    }
}
