//! RBAC configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};

/// Role/permission override configuration
///
/// `grants` is the override table: extra permissions granted to a role beyond
/// what its rank implies, keyed by role name. Names are only checked for
/// shape here; the permission table resolves them against the known role and
/// permission sets when it is built at startup, and fails fast on unknowns.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RbacConfig {
    /// Extra permissions per role, e.g. `moderator: [view_billing]`
    #[serde(default)]
    pub grants: HashMap<String, Vec<String>>,
}

impl Validatable for RbacConfig {
    fn validate(&self) -> ConfigResult<()> {
        for (role, permissions) in &self.grants {
            validate_required_string(role, "grant role", self.domain_name())?;

            if permissions.is_empty() {
                return Err(
                    self.validation_error(format!("grant for role '{}' lists no permissions", role))
                );
            }

            for permission in permissions {
                validate_required_string(permission, "grant permission", self.domain_name())?;
            }
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "rbac"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grants_are_valid() {
        assert!(RbacConfig::default().validate().is_ok());
    }

    #[test]
    fn test_grant_without_permissions_is_rejected() {
        let mut config = RbacConfig::default();
        config.grants.insert("moderator".to_string(), Vec::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_grants_parse_from_yaml() {
        let yaml = "grants:\n  moderator:\n    - view_billing\n";
        let config: RbacConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.grants.get("moderator"),
            Some(&vec!["view_billing".to_string()])
        );
        assert!(config.validate().is_ok());
    }
}
