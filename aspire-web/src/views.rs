//! Server-rendered view guarding

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{error, warn};

use aspire_rbac::{AccessRequirement, AuthError, Guards};
use aspire_types::{AuthUser, RequestContext};

use crate::errors::WebError;

/// Options for guarding a server-rendered view.
#[derive(Clone)]
pub struct ViewOptions {
    pub requirement: AccessRequirement,
    /// Where unauthenticated requests are redirected
    pub sign_in_path: String,
    /// Denied view shown instead of the default one
    pub fallback: Option<Html<String>>,
}

impl ViewOptions {
    pub fn new(requirement: AccessRequirement) -> Self {
        Self {
            requirement,
            sign_in_path: "/auth/sign-in".to_string(),
            fallback: None,
        }
    }

    pub fn sign_in_path(mut self, path: impl Into<String>) -> Self {
        self.sign_in_path = path.into();
        self
    }

    pub fn fallback(mut self, view: Html<String>) -> Self {
        self.fallback = Some(view);
        self
    }
}

/// Render the view for an authorized principal.
///
/// Unauthenticated requests are redirected to the sign-in path. Forbidden
/// requests get the fallback (or the default denied view), which reveals
/// nothing about the missing privilege; the precise reason goes to the
/// server-side log only.
pub async fn render_guarded<F>(
    guards: &Guards,
    ctx: &RequestContext,
    options: &ViewOptions,
    render: F,
) -> Response
where
    F: FnOnce(&AuthUser) -> Html<String>,
{
    match guards.authorize(ctx, &options.requirement).await {
        Ok(user) => render(&user).into_response(),
        Err(AuthError::Unauthenticated) => Redirect::to(&options.sign_in_path).into_response(),
        Err(AuthError::Forbidden { reason }) => {
            warn!(target: "auth", %reason, "view access denied");
            let view = options.fallback.clone().unwrap_or_else(access_denied_view);
            (StatusCode::FORBIDDEN, view).into_response()
        }
        Err(AuthError::SessionStoreUnavailable { message }) => {
            error!(target: "auth", %message, "view authorization could not run");
            WebError::service_unavailable("Authorization service unavailable").into_response()
        }
    }
}

/// Default denied view. Deliberately generic: naming the missing role or
/// permission would let a requester enumerate privileges.
fn access_denied_view() -> Html<String> {
    Html(
        "<h1>Access denied</h1>\
         <p>You don't have permission to view this page.</p>"
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::to_bytes;

    use aspire_interfaces::{InMemorySessionProvider, InMemoryUserStore};
    use aspire_rbac::{PermissionTable, Role, SessionResolver};
    use aspire_types::{SessionToken, UserRecord};

    async fn test_guards() -> Guards {
        let provider = Arc::new(InMemorySessionProvider::new());
        let users = Arc::new(InMemoryUserStore::new());

        users
            .insert(UserRecord::new("u-member", "member@example.com", Role::Member))
            .await;
        provider
            .insert("tok-member", SessionToken::new("u-member", "sess-1"))
            .await;

        let resolver = SessionResolver::new(provider, users, Duration::from_millis(100));
        Guards::new(Arc::new(PermissionTable::builtin()), resolver)
    }

    fn dashboard(user: &AuthUser) -> Html<String> {
        Html(format!("<h1>Dashboard for {}</h1>", user.email))
    }

    #[tokio::test]
    async fn test_authorized_view_renders() {
        let guards = test_guards().await;
        let options = ViewOptions::new(AccessRequirement::Authenticated);

        let response = render_guarded(
            &guards,
            &RequestContext::with_token("tok-member"),
            &options,
            dashboard,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("member@example.com"));
    }

    #[tokio::test]
    async fn test_unauthenticated_view_redirects_to_sign_in() {
        let guards = test_guards().await;
        let options = ViewOptions::new(AccessRequirement::Authenticated).sign_in_path("/login");

        let response =
            render_guarded(&guards, &RequestContext::anonymous(), &options, dashboard).await;

        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get("location").unwrap().to_str().unwrap(),
            "/login"
        );
    }

    #[tokio::test]
    async fn test_forbidden_view_does_not_leak_the_requirement() {
        let guards = test_guards().await;
        let options = ViewOptions::new(AccessRequirement::MinRole(Role::Admin));

        let response = render_guarded(
            &guards,
            &RequestContext::with_token("tok-member"),
            &options,
            dashboard,
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Access denied"));
        assert!(!html.contains("admin"));
    }

    #[tokio::test]
    async fn test_forbidden_view_uses_the_fallback() {
        let guards = test_guards().await;
        let options = ViewOptions::new(AccessRequirement::Admin)
            .fallback(Html("<p>Members only lounge</p>".to_string()));

        let response = render_guarded(
            &guards,
            &RequestContext::with_token("tok-member"),
            &options,
            dashboard,
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Members only lounge"));
    }
}
