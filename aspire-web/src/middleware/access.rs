//! Access-check middleware wrapping protected handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};

use aspire_rbac::{AccessRequirement, Guards};
use aspire_types::AuthUser;

use crate::errors::WebError;
use crate::extractors::request_context;

/// State for one protected route group: the guards plus the single
/// requirement its handlers state.
#[derive(Clone)]
pub struct AccessState {
    pub guards: Arc<Guards>,
    pub requirement: AccessRequirement,
}

impl AccessState {
    pub fn new(guards: Arc<Guards>, requirement: AccessRequirement) -> Self {
        Self {
            guards,
            requirement,
        }
    }
}

/// Run the access check before the wrapped handler.
///
/// On failure the handler is never invoked and the request short-circuits to
/// 401 (no valid session), 403 (insufficient privilege) or 503 (authorization
/// infrastructure down). On success the resolved principal is inserted into
/// the request extensions for the [`crate::CurrentUser`] extractor.
pub async fn access_middleware(
    State(state): State<AccessState>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let ctx = request_context(request.headers());
    let user: AuthUser = state.guards.authorize(&ctx, &state.requirement).await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Wrap a router's handlers with an access requirement.
///
/// The returned router performs the check before every wrapped handler;
/// there is no fallthrough path to a handler on failure.
pub fn protect(router: Router, guards: Arc<Guards>, requirement: AccessRequirement) -> Router {
    router.layer(middleware::from_fn_with_state(
        AccessState::new(guards, requirement),
        access_middleware,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    use aspire_interfaces::{InMemorySessionProvider, InMemoryUserStore};
    use aspire_rbac::{PermissionTable, Role, SessionResolver};
    use aspire_types::{SessionToken, UserRecord};

    use crate::extractors::CurrentUser;

    async fn test_guards() -> Arc<Guards> {
        let provider = Arc::new(InMemorySessionProvider::new());
        let users = Arc::new(InMemoryUserStore::new());

        for (id, role, token) in [
            ("u-member", Role::Member, "tok-member"),
            ("u-admin", Role::Admin, "tok-admin"),
        ] {
            users
                .insert(UserRecord::new(id, format!("{}@example.com", id), role))
                .await;
            provider
                .insert(token, SessionToken::new(id, format!("sess-{}", id)))
                .await;
        }

        let resolver = SessionResolver::new(provider, users, Duration::from_millis(100));
        Arc::new(Guards::new(Arc::new(PermissionTable::builtin()), resolver))
    }

    fn spy_router(guards: Arc<Guards>, hits: Arc<AtomicUsize>) -> Router {
        let handler = move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                "ok"
            }
        };

        let router = Router::new().route("/admin/users", get(handler));
        protect(router, guards, AccessRequirement::Admin)
    }

    fn request(token: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/admin/users");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_no_session_is_401_and_handler_never_runs() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = spy_router(test_guards().await, hits.clone());

        let response = app.oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_insufficient_role_is_403_not_401() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = spy_router(test_guards().await, hits.clone());

        let response = app.oneshot(request(Some("tok-member"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "FORBIDDEN");
        // The body must not name the role that would have sufficed.
        assert!(!json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("admin"));
    }

    #[tokio::test]
    async fn test_sufficient_role_reaches_the_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = spy_router(test_guards().await, hits.clone());

        let response = app.oneshot(request(Some("tok-admin"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handler_sees_the_resolved_principal() {
        let guards = test_guards().await;

        async fn whoami(CurrentUser(user): CurrentUser) -> String {
            user.id
        }

        let router = Router::new().route("/whoami", get(whoami));
        let app = protect(router, guards, AccessRequirement::Authenticated);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header("authorization", "Bearer tok-member")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        assert_eq!(&body[..], b"u-member");
    }
}
