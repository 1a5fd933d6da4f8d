//! Request-scoped session resolution

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use aspire_config::AuthConfig;
use aspire_interfaces::{SessionProvider, StoreError, UserStore};
use aspire_types::{AuthUser, RequestContext};

use crate::error::{AuthError, AuthResult};

/// Resolves the ambient request context into the current principal.
///
/// One session-provider lookup plus one user-store lookup per request, both
/// bounded by the configured timeout. The role always comes from the user
/// store, never from the token, so a role change takes effect on the
/// subject's next request without reissuing sessions.
#[derive(Clone)]
pub struct SessionResolver {
    provider: Arc<dyn SessionProvider>,
    users: Arc<dyn UserStore>,
    lookup_timeout: Duration,
}

impl SessionResolver {
    pub fn new(
        provider: Arc<dyn SessionProvider>,
        users: Arc<dyn UserStore>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            users,
            lookup_timeout,
        }
    }

    /// Create a resolver from the auth configuration.
    pub fn from_config(
        provider: Arc<dyn SessionProvider>,
        users: Arc<dyn UserStore>,
        config: &AuthConfig,
    ) -> Self {
        Self::new(provider, users, config.lookup_timeout)
    }

    /// Resolve the current principal.
    ///
    /// `Ok(None)` is the normal "no one is logged in" outcome, never an
    /// error. `Err(SessionStoreUnavailable)` means the check could not run
    /// and the caller must fail closed.
    pub async fn current_user(&self, ctx: &RequestContext) -> AuthResult<Option<AuthUser>> {
        let token = match self
            .bounded(self.provider.resolve_session(ctx), "session lookup")
            .await?
        {
            Some(token) => token,
            None => return Ok(None),
        };

        let record = match self
            .bounded(self.users.find_user_by_id(&token.user_id), "user lookup")
            .await?
        {
            Some(record) => record,
            None => {
                debug!(user_id = %token.user_id, "session refers to an unknown user");
                return Ok(None);
            }
        };

        if !record.is_active {
            debug!(user_id = %record.id, "session refers to a deactivated user");
            return Ok(None);
        }

        Ok(Some(AuthUser::from(&record)))
    }

    async fn bounded<T>(
        &self,
        lookup: impl Future<Output = Result<T, StoreError>>,
        what: &str,
    ) -> AuthResult<T> {
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(result) => result.map_err(AuthError::from),
            Err(_) => Err(AuthError::store_unavailable(format!(
                "{} timed out after {}ms",
                what,
                self.lookup_timeout.as_millis()
            ))),
        }
    }
}
