//! Common error type for collaborator stores

use thiserror::Error;

/// Errors a collaborator store can surface.
///
/// "Not found" outcomes are modelled as `Ok(None)` on the individual trait
/// methods, never as errors; this type is reserved for the store itself
/// misbehaving.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached
    #[error("store connection error: {message}")]
    Connection { message: String },

    /// The operation exceeded its deadline
    #[error("store operation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The store rejected the write
    #[error("store constraint violation: {message}")]
    Constraint { message: String },

    /// Anything else
    #[error("internal store error: {message}")]
    Internal { message: String },
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
