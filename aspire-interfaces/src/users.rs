//! User store interface

use async_trait::async_trait;

use aspire_types::{Role, UserRecord};

use crate::error::StoreError;

/// The source of truth for user records.
///
/// Roles are always read from here rather than from session tokens, since a
/// role can change between token issuance and use.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the current record for a user.
    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Persist a role change and return the updated record.
    ///
    /// `Ok(None)` when no user with that id exists.
    async fn update_role(&self, id: &str, new_role: Role)
        -> Result<Option<UserRecord>, StoreError>;
}
