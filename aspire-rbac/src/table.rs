//! Static role/permission lookup table

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use aspire_config::{ConfigError, ConfigResult, RbacConfig};
use aspire_types::{Permission, Role};

/// Immutable permission lookup, built once at process start.
///
/// A role holds a permission when its rank meets the permission's minimum
/// role, or when an override grant says so. Override grants support
/// non-linear cases such as letting moderators see billing without ranking
/// them above other moderators.
///
/// Checks are O(1), side-effect free, and safe for unsynchronized concurrent
/// reads; the table is shared by reference (`Arc`) and never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    min_role: HashMap<Permission, Role>,
    grants: HashMap<Role, HashSet<Permission>>,
}

impl PermissionTable {
    /// Table with the built-in minimum roles and no override grants.
    pub fn builtin() -> Self {
        let min_role = Permission::ALL
            .iter()
            .map(|p| (*p, p.default_min_role()))
            .collect();

        Self {
            min_role,
            grants: HashMap::new(),
        }
    }

    /// Build the table from configuration.
    ///
    /// Unknown role or permission names are a configuration error and fail
    /// the build; they are never tolerated per-check at runtime.
    pub fn from_config(config: &RbacConfig) -> ConfigResult<Self> {
        let mut table = Self::builtin();

        for (role_name, permission_names) in &config.grants {
            let role = Role::from_str(role_name).map_err(|e| ConfigError::DomainError {
                domain: "rbac".to_string(),
                message: e.to_string(),
            })?;

            for name in permission_names {
                let permission =
                    Permission::from_str(name).map_err(|e| ConfigError::DomainError {
                        domain: "rbac".to_string(),
                        message: e.to_string(),
                    })?;

                table.grants.entry(role).or_default().insert(permission);
            }
        }

        Ok(table)
    }

    /// Minimum role that holds the permission, absent override grants.
    pub fn min_role_for(&self, permission: Permission) -> Role {
        // Every permission is seeded by builtin(); fail closed if not.
        self.min_role
            .get(&permission)
            .copied()
            .unwrap_or(Role::SuperAdmin)
    }

    /// Whether the role holds the permission, by rank or by override grant.
    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        if role.satisfies(self.min_role_for(permission)) {
            return true;
        }

        self.grants
            .get(&role)
            .is_some_and(|granted| granted.contains(&permission))
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::builtin()
    }
}
