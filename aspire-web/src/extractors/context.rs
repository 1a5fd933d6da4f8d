//! Request context construction from HTTP headers

use axum::http::HeaderMap;

use aspire_types::{RequestContext, RequestMetadata};

/// Build the authorization request context from the request headers.
pub fn request_context(headers: &HeaderMap) -> RequestContext {
    RequestContext {
        session_token: extract_session_token(headers),
        metadata: request_metadata(headers),
    }
}

/// Extract the opaque session token from headers or cookies.
fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    // Try Authorization header first (Bearer token format)
    if let Some(auth_header) = headers.get("authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    // Try X-Session-Id header
    if let Some(session_header) = headers.get("x-session-id") {
        if let Ok(session_id) = session_header.to_str() {
            return Some(session_id.to_string());
        }
    }

    // Try cookie (simplified cookie parsing)
    if let Some(cookie_header) = headers.get("cookie") {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(session_id) = cookie.strip_prefix("session_id=") {
                    return Some(session_id.to_string());
                }
            }
        }
    }

    None
}

/// Client metadata for audit records and logs.
pub fn request_metadata(headers: &HeaderMap) -> RequestMetadata {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        // The first entry is the originating client.
        .and_then(|chain| chain.split(',').next())
        .map(|ip| ip.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
                .map(|ip| ip.to_string())
        });

    let user_agent = headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .map(|ua| ua.to_string());

    RequestMetadata {
        ip_address,
        user_agent,
    }
}
