//! Domain-driven configuration management for the Aspire authorization core
//!
//! Configuration is split by functional domain (rbac, auth, audit), with
//! validation, defaults, and environment variable support.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{audit::AuditConfig, auth::AuthConfig, rbac::RbacConfig, AspireConfig};
