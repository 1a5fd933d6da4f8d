//! Session provider interface

use async_trait::async_trait;

use aspire_types::{RequestContext, SessionToken};

use crate::error::StoreError;

/// Resolves the ambient request context into a session reference.
///
/// The token in the request is opaque to the authorization core; only the
/// provider interprets it.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolve the request's session, if it carries a valid one.
    ///
    /// `Ok(None)` covers both "no token present" and "token invalid or
    /// expired" - normal, frequent outcomes. Errors are reserved for the
    /// provider itself being unreachable, which callers must treat as
    /// "cannot tell who is logged in" and fail closed.
    async fn resolve_session(
        &self,
        ctx: &RequestContext,
    ) -> Result<Option<SessionToken>, StoreError>;
}
