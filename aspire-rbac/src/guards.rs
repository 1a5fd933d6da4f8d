//! Enforcement guards, the sole gate for protected operations

use std::sync::Arc;

use aspire_types::{AuthUser, Permission, RequestContext, Role};

use crate::error::{AuthError, AuthResult, DenialReason};
use crate::session::SessionResolver;
use crate::table::PermissionTable;

/// The single access requirement a protected operation states.
///
/// Exactly one requirement applies per operation; `Authenticated` is the gate
/// when nothing stricter is asked for. Modelling this as an enum makes the
/// "exactly one of" contract hold by construction instead of by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequirement {
    /// Any authenticated principal
    Authenticated,
    /// Principal at or above the given role
    MinRole(Role),
    /// Principal holding the given permission
    Permission(Permission),
    /// Principal with an administrative role
    Admin,
}

/// Request-scoped authorization checks over the static permission table.
///
/// Authentication strictly precedes authorization: every guard resolves the
/// session first, so a missing session always yields `Unauthenticated` and
/// never `Forbidden`. Rejections are terminal for the request; nothing here
/// retries.
#[derive(Clone)]
pub struct Guards {
    table: Arc<PermissionTable>,
    resolver: SessionResolver,
}

impl Guards {
    pub fn new(table: Arc<PermissionTable>, resolver: SessionResolver) -> Self {
        Self { table, resolver }
    }

    /// Resolve the current principal or fail with `Unauthenticated`.
    pub async fn require_auth(&self, ctx: &RequestContext) -> AuthResult<AuthUser> {
        self.resolver
            .current_user(ctx)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }

    /// Authenticated principal at or above `min`.
    pub async fn require_role(&self, ctx: &RequestContext, min: Role) -> AuthResult<AuthUser> {
        let user = self.require_auth(ctx).await?;

        if !user.role.satisfies(min) {
            return Err(AuthError::forbidden(DenialReason::InsufficientRole {
                required: min,
            }));
        }

        Ok(user)
    }

    /// Authenticated principal holding `permission`.
    pub async fn require_permission(
        &self,
        ctx: &RequestContext,
        permission: Permission,
    ) -> AuthResult<AuthUser> {
        let user = self.require_auth(ctx).await?;

        if !self.table.has_permission(user.role, permission) {
            return Err(AuthError::forbidden(DenialReason::MissingPermission {
                permission,
            }));
        }

        Ok(user)
    }

    /// Authenticated principal with an administrative role.
    pub async fn require_admin(&self, ctx: &RequestContext) -> AuthResult<AuthUser> {
        let user = self.require_auth(ctx).await?;

        if !user.role.is_admin() {
            return Err(AuthError::forbidden(DenialReason::AdminRequired));
        }

        Ok(user)
    }

    /// Dispatch on the operation's single stated requirement.
    pub async fn authorize(
        &self,
        ctx: &RequestContext,
        requirement: &AccessRequirement,
    ) -> AuthResult<AuthUser> {
        match requirement {
            AccessRequirement::Authenticated => self.require_auth(ctx).await,
            AccessRequirement::MinRole(min) => self.require_role(ctx, *min).await,
            AccessRequirement::Permission(permission) => {
                self.require_permission(ctx, *permission).await
            }
            AccessRequirement::Admin => self.require_admin(ctx).await,
        }
    }

    /// The table these guards check against.
    pub fn table(&self) -> &PermissionTable {
        &self.table
    }
}
