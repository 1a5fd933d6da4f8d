//! Role mutation with commit-then-audit ordering

use std::sync::Arc;

use tracing::info;

use aspire_interfaces::UserStore;
use aspire_types::{AuditEvent, AuthUser, RequestMetadata, Role, UserRecord};

use crate::error::RoleChangeError;
use crate::sink::AuditSink;

/// Performs role mutations and feeds the audit sink.
///
/// The guards gate who may call this; the service itself only owns the
/// mutation and its audit record. The mutation commits before the audit
/// append, never after a speculative one, so a crash between the two can at
/// worst under-log - it can never log a change that did not happen.
pub struct RoleChangeService {
    users: Arc<dyn UserStore>,
    sink: AuditSink,
}

impl RoleChangeService {
    pub fn new(users: Arc<dyn UserStore>, sink: AuditSink) -> Self {
        Self { users, sink }
    }

    /// Change `subject_id`'s role on behalf of `actor`.
    ///
    /// Assigning the role a user already holds is a no-op: no mutation, no
    /// audit event. An audit append failure after a committed mutation is
    /// alerted by the sink and does not surface here; the committed change
    /// stands either way.
    pub async fn change_role(
        &self,
        actor: &AuthUser,
        subject_id: &str,
        new_role: Role,
        metadata: &RequestMetadata,
    ) -> Result<UserRecord, RoleChangeError> {
        let current = self
            .users
            .find_user_by_id(subject_id)
            .await?
            .ok_or_else(|| RoleChangeError::UserNotFound {
                user_id: subject_id.to_string(),
            })?;

        if current.role == new_role {
            return Ok(current);
        }

        let updated = self
            .users
            .update_role(subject_id, new_role)
            .await?
            .ok_or_else(|| RoleChangeError::UserNotFound {
                user_id: subject_id.to_string(),
            })?;

        info!(
            subject = %updated.id,
            actor = %actor.id,
            old_role = %current.role,
            new_role = %new_role,
            "role changed"
        );

        let event = AuditEvent::role_changed(&updated.id, &actor.id, current.role, new_role)
            .with_metadata(metadata);

        // The sink has already raised the alert on failure; the committed
        // change stands.
        let _ = self.sink.log_role_change(event).await;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use async_trait::async_trait;
    use aspire_config::AuditConfig;
    use aspire_interfaces::{AuditStore, InMemoryAuditStore, InMemoryUserStore, StoreError};
    use aspire_types::AuditEventType;

    fn admin() -> AuthUser {
        AuthUser {
            id: "u-admin".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            two_factor_enabled: true,
        }
    }

    fn fast_config() -> AuditConfig {
        AuditConfig {
            retry_attempts: 2,
            retry_delay: Duration::from_millis(1),
            write_timeout: Duration::from_millis(100),
            ..AuditConfig::default()
        }
    }

    async fn service_with_member() -> (RoleChangeService, Arc<InMemoryAuditStore>) {
        let users = Arc::new(InMemoryUserStore::new());
        users
            .insert(UserRecord::new("u-1", "alice@example.com", Role::Member))
            .await;

        let store = Arc::new(InMemoryAuditStore::new());
        let sink = AuditSink::new(store.clone(), fast_config());

        (RoleChangeService::new(users, sink), store)
    }

    #[tokio::test]
    async fn test_successful_change_writes_exactly_one_event() {
        let (service, store) = service_with_member().await;

        let updated = service
            .change_role(&admin(), "u-1", Role::Moderator, &RequestMetadata::default())
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Moderator);

        let events = store.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, AuditEventType::RoleChanged);
        assert_eq!(events[0].subject_user_id, "u-1");
        assert_eq!(events[0].actor_user_id, "u-admin");
        assert_eq!(events[0].old_role, Role::Member);
        assert_eq!(events[0].new_role, Role::Moderator);
    }

    #[tokio::test]
    async fn test_event_carries_request_metadata() {
        let (service, store) = service_with_member().await;
        let metadata = RequestMetadata {
            ip_address: Some("203.0.113.9".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
        };

        service
            .change_role(&admin(), "u-1", Role::Moderator, &metadata)
            .await
            .unwrap();

        let events = store.events().await;
        assert_eq!(events[0].ip_address.as_deref(), Some("203.0.113.9"));
        assert_eq!(events[0].user_agent.as_deref(), Some("Mozilla/5.0"));
    }

    #[tokio::test]
    async fn test_failed_mutation_writes_no_event() {
        let (service, store) = service_with_member().await;

        let err = service
            .change_role(&admin(), "u-404", Role::Moderator, &RequestMetadata::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RoleChangeError::UserNotFound {
                user_id: "u-404".to_string()
            }
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unchanged_role_is_a_no_op() {
        let (service, store) = service_with_member().await;

        let record = service
            .change_role(&admin(), "u-1", Role::Member, &RequestMetadata::default())
            .await
            .unwrap();
        assert_eq!(record.role, Role::Member);
        assert!(store.is_empty().await);
    }

    struct FailingAuditStore;

    #[async_trait]
    impl AuditStore for FailingAuditStore {
        async fn append(&self, _event: &AuditEvent) -> Result<(), StoreError> {
            Err(StoreError::connection("audit store down"))
        }
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_undo_the_mutation() {
        let users = Arc::new(InMemoryUserStore::new());
        users
            .insert(UserRecord::new("u-1", "alice@example.com", Role::Member))
            .await;

        let sink = AuditSink::new(Arc::new(FailingAuditStore), fast_config());
        let service = RoleChangeService::new(users.clone(), sink);

        // The caller still sees success; the sink alerts the gap out-of-band.
        let updated = service
            .change_role(&admin(), "u-1", Role::Moderator, &RequestMetadata::default())
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Moderator);

        let reread = users.find_user_by_id("u-1").await.unwrap().unwrap();
        assert_eq!(reread.role, Role::Moderator);
    }
}
