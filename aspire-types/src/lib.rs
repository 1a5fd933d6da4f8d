//! # Aspire Types
//!
//! Shared types for the Aspire authorization core.
//!
//! This crate is the dependency leaf of the workspace: pure data types with
//! no I/O and no framework dependencies, shared by the permission table, the
//! enforcement guards, the audit sink and the web surface.
//!
//! ## Main types
//!
//! - [`Role`] - ranked identity categories with a fixed total order
//! - [`Permission`] - capability tokens mapped to minimum role ranks
//! - [`AuthUser`] - the resolved principal for one request
//! - [`AuditEvent`] - immutable record of a role change

pub mod audit;
pub mod permissions;
pub mod roles;
pub mod session;
pub mod user;

pub use audit::{AuditEvent, AuditEventType};
pub use permissions::{Permission, UnknownPermission};
pub use roles::{Role, UnknownRole};
pub use session::{RequestContext, RequestMetadata, SessionToken};
pub use user::{AuthUser, UserRecord};
