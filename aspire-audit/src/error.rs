//! Error types for audit operations

use thiserror::Error;

use aspire_interfaces::StoreError;

/// The role mutation committed but its audit record did not persist.
///
/// Deliberately a separate type from the guard layer's errors: the compiler
/// keeps it out of the request/response path. It is alerted out-of-band and
/// never shown to the user whose operation succeeded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("audit write failed after {attempts} attempts: {message}")]
pub struct AuditWriteError {
    pub attempts: u32,
    pub message: String,
}

/// Errors from the role mutation path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleChangeError {
    /// No user with the given id exists
    #[error("user not found: {user_id}")]
    UserNotFound { user_id: String },

    /// The user store failed; the mutation did not commit
    #[error(transparent)]
    Store(#[from] StoreError),
}
