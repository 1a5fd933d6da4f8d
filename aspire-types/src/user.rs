//! Principal and user store records

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Resolved principal for the current request.
///
/// Produced by the session resolver once per request and dropped with it.
/// This layer never caches it across requests; any caching belongs to the
/// session provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub two_factor_enabled: bool,
}

/// User row as the user store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub two_factor_enabled: bool,
    pub is_active: bool,
}

impl UserRecord {
    /// Create an active record with two-factor disabled.
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role,
            two_factor_enabled: false,
            is_active: true,
        }
    }

    /// Mark the account as deactivated.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

impl From<&UserRecord> for AuthUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            email: record.email.clone(),
            role: record.role,
            two_factor_enabled: record.two_factor_enabled,
        }
    }
}
