//! Extractors and request context construction

pub mod auth;
pub mod context;

pub use auth::CurrentUser;
pub use context::{request_context, request_metadata};
