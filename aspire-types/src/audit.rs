//! Audit event records for security-relevant state changes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::Role;
use crate::session::RequestMetadata;

/// Types of audited events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    RoleChanged,
}

/// Immutable record of a role change.
///
/// Created exactly once per committed role mutation, after the mutation is
/// durable, and append-only from there on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event ID
    pub id: Uuid,
    pub event_type: AuditEventType,
    /// User whose role changed
    pub subject_user_id: String,
    /// User who performed the change
    pub actor_user_id: String,
    pub old_role: Role,
    pub new_role: Role,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    /// Create a role-change event stamped with the current time.
    pub fn role_changed(
        subject_user_id: impl Into<String>,
        actor_user_id: impl Into<String>,
        old_role: Role,
        new_role: Role,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: AuditEventType::RoleChanged,
            subject_user_id: subject_user_id.into(),
            actor_user_id: actor_user_id.into(),
            old_role,
            new_role,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach the request metadata the change arrived with.
    pub fn with_metadata(mut self, metadata: &RequestMetadata) -> Self {
        self.ip_address = metadata.ip_address.clone();
        self.user_agent = metadata.user_agent.clone();
        self
    }
}
