//! In-memory collaborator implementations
//!
//! Development fallbacks and test fixtures. All three are safe to share
//! across tasks behind an `Arc`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use aspire_types::{AuditEvent, RequestContext, Role, SessionToken, UserRecord};

use crate::audit::AuditStore;
use crate::error::StoreError;
use crate::session::SessionProvider;
use crate::users::UserStore;

/// Session provider backed by a token map.
#[derive(Default)]
pub struct InMemorySessionProvider {
    sessions: RwLock<HashMap<String, SessionToken>>,
}

impl InMemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under the given bearer token.
    pub async fn insert(&self, token: impl Into<String>, session: SessionToken) {
        self.sessions.write().await.insert(token.into(), session);
    }

    /// Drop a session, invalidating its token.
    pub async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

#[async_trait]
impl SessionProvider for InMemorySessionProvider {
    async fn resolve_session(
        &self,
        ctx: &RequestContext,
    ) -> Result<Option<SessionToken>, StoreError> {
        let Some(token) = ctx.session_token.as_deref() else {
            return Ok(None);
        };
        Ok(self.sessions.read().await.get(token).cloned())
    }
}

/// User store backed by a record map.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: UserRecord) {
        self.users.write().await.insert(record.id.clone(), record);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn update_role(
        &self,
        id: &str,
        new_role: Role,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut users = self.users.write().await;
        match users.get_mut(id) {
            Some(record) => {
                record.role = new_role;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }
}

/// Audit store that keeps appended events in order.
#[derive(Default)]
pub struct InMemoryAuditStore {
    events: Mutex<Vec<AuditEvent>>,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event appended so far.
    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.lock().await.is_empty()
    }
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn append(&self, event: &AuditEvent) -> Result<(), StoreError> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}
