//! Session token and request context types

use serde::{Deserialize, Serialize};

/// Opaque session reference as the session provider resolves it.
///
/// Carries the user id the session was issued for and nothing else. The role
/// is deliberately absent: it is re-read from the user store on every request
/// so that role changes take effect without reissuing sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub user_id: String,
    pub session_id: String,
}

impl SessionToken {
    pub fn new(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }
}

/// Ambient request data the authorization layer operates on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Raw session token from the request, if any. Opaque to this layer;
    /// only the session provider interprets it.
    pub session_token: Option<String>,
    pub metadata: RequestMetadata,
}

impl RequestContext {
    /// Context for a request carrying no session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for a request carrying the given session token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            session_token: Some(token.into()),
            metadata: RequestMetadata::default(),
        }
    }

    /// Attach request metadata.
    pub fn metadata(mut self, metadata: RequestMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Client metadata recorded alongside security-relevant events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetadata {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
