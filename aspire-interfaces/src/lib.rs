//! # Aspire Interfaces
//!
//! Collaborator interfaces for the Aspire authorization core.
//!
//! The authorization layer never talks to session, user or audit storage
//! directly; it goes through the traits defined here. This keeps the core a
//! pure function of (session, static permission table) and lets deployments
//! plug in their own backends without touching the enforcement logic.
//!
//! ## Main interfaces
//!
//! - [`SessionProvider`] - resolves an opaque session token from a request
//! - [`UserStore`] - the source of truth for user records and roles
//! - [`AuditStore`] - append-only sink for audit events
//!
//! The [`memory`] module ships in-memory implementations of all three, used
//! as development fallbacks and test fixtures.

pub mod audit;
pub mod error;
pub mod memory;
pub mod session;
pub mod users;

pub use audit::AuditStore;
pub use error::StoreError;
pub use memory::{InMemoryAuditStore, InMemorySessionProvider, InMemoryUserStore};
pub use session::SessionProvider;
pub use users::UserStore;
