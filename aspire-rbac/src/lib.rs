//! RBAC (Role-Based Access Control) implementation for the Aspire platform
//!
//! This crate provides the authorization core:
//! - A ranked role hierarchy with a static permission table and override grants
//! - Request-scoped session resolution against injected collaborator stores
//! - Enforcement guards that gate protected operations
//!
//! The permission table is built once at startup and shared read-only; every
//! check is a pure function of the resolved session and that table.

pub mod error;
pub mod guards;
pub mod session;
pub mod table;

pub use error::{AuthError, AuthResult, DenialReason};
pub use guards::{AccessRequirement, Guards};
pub use session::SessionResolver;
pub use table::PermissionTable;

/// Re-export commonly used types
pub use aspire_types::{AuthUser, Permission, RequestContext, Role};
