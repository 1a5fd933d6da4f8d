//! Middleware for access enforcement

pub mod access;

pub use access::{access_middleware, protect, AccessState};
