//! Authentication extractors for Axum

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use aspire_types::AuthUser;

use crate::errors::WebError;

/// Resolved principal for the current request.
///
/// Set by the access middleware after a successful check; handlers behind
/// [`crate::protect`] can rely on it being present.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                WebError::internal(
                    "Authenticated principal not found. Ensure the access layer is applied.",
                )
            })
    }
}
