//! Role hierarchy for the Aspire platform

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ranked identity category assigned to a user.
///
/// The set and its total order are fixed at compile time and never mutated at
/// runtime. A higher-ranked role implies every capability of the ranks below
/// it; declaration order defines the rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Guest,
    Member,
    Moderator,
    Admin,
    SuperAdmin,
}

impl Role {
    /// All roles in ascending rank order.
    pub const ALL: [Role; 5] = [
        Role::Guest,
        Role::Member,
        Role::Moderator,
        Role::Admin,
        Role::SuperAdmin,
    ];

    /// Numeric rank of this role within the hierarchy.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Whether this role meets or exceeds the required role.
    pub fn satisfies(&self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    /// Whether this role carries administrative privileges.
    pub fn is_admin(&self) -> bool {
        self.satisfies(Role::Admin)
    }

    /// String form used in configuration and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Member => "member",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role name that is not part of the known hierarchy.
///
/// Unknown roles are a configuration error, caught at startup validation
/// rather than recovered from per-call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Role::Guest),
            "member" => Ok(Role::Member),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            "super_admin" => Ok(Role::SuperAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(Role::Guest.rank() < Role::Member.rank());
        assert!(Role::Member.rank() < Role::Moderator.rank());
        assert!(Role::Moderator.rank() < Role::Admin.rank());
        assert!(Role::Admin.rank() < Role::SuperAdmin.rank());
    }

    #[test]
    fn test_satisfies_matches_rank_comparison() {
        for r1 in Role::ALL {
            for r2 in Role::ALL {
                assert_eq!(r1.satisfies(r2), r1.rank() >= r2.rank());
            }
        }
    }

    #[test]
    fn test_satisfies_is_reflexive() {
        for role in Role::ALL {
            assert!(role.satisfies(role));
        }
    }

    #[test]
    fn test_satisfies_is_transitive() {
        for a in Role::ALL {
            for b in Role::ALL {
                for c in Role::ALL {
                    if a.satisfies(b) && b.satisfies(c) {
                        assert!(a.satisfies(c));
                    }
                }
            }
        }
    }

    #[test]
    fn test_is_admin_matches_admin_rank() {
        for role in Role::ALL {
            assert_eq!(role.is_admin(), role.satisfies(Role::Admin));
        }
        assert!(!Role::Moderator.is_admin());
        assert!(Role::Admin.is_admin());
        assert!(Role::SuperAdmin.is_admin());
    }

    #[test]
    fn test_parse_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }

        assert_eq!(
            "owner".parse::<Role>(),
            Err(UnknownRole("owner".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");
        assert_eq!(serde_json::from_str::<Role>(&json).unwrap(), Role::SuperAdmin);
    }
}
