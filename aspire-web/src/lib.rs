//! # Aspire Web
//!
//! Axum deployment surface for the Aspire authorization core.
//!
//! Two ways to protect an operation, with identical semantics:
//!
//! - **Handler wrapping:** [`protect`] applies an access check in front of a
//!   router's handlers; on failure the request short-circuits to a 401/403
//!   JSON error and the handler never runs. The resolved principal reaches
//!   handlers through the [`CurrentUser`] extractor.
//! - **View guarding:** [`render_guarded`] renders a view for an authorized
//!   principal, redirects unauthenticated requests to sign-in, and shows
//!   forbidden requests a generic denied view that does not reveal which
//!   privilege was missing.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::{routing::get, Router};
//! use aspire_rbac::{AccessRequirement, Guards, Role};
//! use aspire_web::{protect, CurrentUser};
//!
//! async fn list_users(CurrentUser(user): CurrentUser) -> String {
//!     format!("hello {}", user.email)
//! }
//!
//! fn admin_routes(guards: Arc<Guards>) -> Router {
//!     let router = Router::new().route("/admin/users", get(list_users));
//!     protect(router, guards, AccessRequirement::MinRole(Role::Admin))
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod views;

// Re-export commonly used types and functions
pub use errors::{WebError, WebResult};
pub use extractors::{request_context, request_metadata, CurrentUser};
pub use middleware::{access_middleware, protect, AccessState};
pub use views::{render_guarded, ViewOptions};
