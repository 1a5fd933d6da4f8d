//! Audit sink and role-change service for the Aspire platform
//!
//! Records role-change events durably and immutably:
//! - [`AuditSink`] appends events through an injected store with bounded
//!   retries, isolated from request cancellation
//! - [`RoleChangeService`] owns the commit-then-audit ordering for role
//!   mutations
//! - [`TracingAuditStore`] and [`FileAuditStore`] are the bundled store
//!   backends

pub mod error;
pub mod service;
pub mod sink;
pub mod store;

pub use error::{AuditWriteError, RoleChangeError};
pub use service::RoleChangeService;
pub use sink::AuditSink;
pub use store::{FileAuditStore, TracingAuditStore};
