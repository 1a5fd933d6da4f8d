//! Domain-specific configuration modules

pub mod audit;
pub mod auth;
pub mod rbac;
pub mod utils;

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::validation::Validatable;

/// Top-level configuration for the authorization core
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AspireConfig {
    /// Role/permission override grants
    #[serde(default)]
    pub rbac: rbac::RbacConfig,

    /// Session resolution configuration
    #[serde(default)]
    pub auth: auth::AuthConfig,

    /// Audit sink configuration
    #[serde(default)]
    pub audit: audit::AuditConfig,
}

impl AspireConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.rbac.validate()?;
        self.auth.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AspireConfig::default();
        assert!(config.validate_all().is_ok());
    }
}
