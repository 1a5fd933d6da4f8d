//! Capability tokens and their built-in minimum roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::roles::Role;

/// Named capability token, independent of role.
///
/// Each permission maps to the minimum role rank required to hold it; the
/// mapping is static. Deployments can additionally grant a permission to a
/// specific role through the override table in the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    EnrollCourse,
    PostDiscussion,
    ModerateDiscussions,
    PublishCourse,
    ManageCourses,
    IssueCertificates,
    ViewBilling,
    ManageUsers,
    ChangeUserRole,
    ViewAuditLog,
    ManagePlatform,
}

impl Permission {
    /// All known permissions.
    pub const ALL: [Permission; 11] = [
        Permission::EnrollCourse,
        Permission::PostDiscussion,
        Permission::ModerateDiscussions,
        Permission::PublishCourse,
        Permission::ManageCourses,
        Permission::IssueCertificates,
        Permission::ViewBilling,
        Permission::ManageUsers,
        Permission::ChangeUserRole,
        Permission::ViewAuditLog,
        Permission::ManagePlatform,
    ];

    /// Minimum role that holds this permission, absent override grants.
    pub fn default_min_role(&self) -> Role {
        match self {
            Permission::EnrollCourse | Permission::PostDiscussion => Role::Member,
            Permission::ModerateDiscussions
            | Permission::PublishCourse
            | Permission::ManageCourses
            | Permission::IssueCertificates => Role::Moderator,
            Permission::ViewBilling
            | Permission::ManageUsers
            | Permission::ChangeUserRole
            | Permission::ViewAuditLog => Role::Admin,
            Permission::ManagePlatform => Role::SuperAdmin,
        }
    }

    /// String form used in configuration and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::EnrollCourse => "enroll_course",
            Permission::PostDiscussion => "post_discussion",
            Permission::ModerateDiscussions => "moderate_discussions",
            Permission::PublishCourse => "publish_course",
            Permission::ManageCourses => "manage_courses",
            Permission::IssueCertificates => "issue_certificates",
            Permission::ViewBilling => "view_billing",
            Permission::ManageUsers => "manage_users",
            Permission::ChangeUserRole => "change_user_role",
            Permission::ViewAuditLog => "view_audit_log",
            Permission::ManagePlatform => "manage_platform",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permission name that is not part of the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for permission in Permission::ALL {
            assert_eq!(permission.as_str().parse::<Permission>().unwrap(), permission);
        }

        assert_eq!(
            "delete_everything".parse::<Permission>(),
            Err(UnknownPermission("delete_everything".to_string()))
        );
    }

    #[test]
    fn test_every_permission_has_a_minimum_role() {
        // Guests hold nothing by default; everything is gated at member or above.
        for permission in Permission::ALL {
            assert!(permission.default_min_role().rank() >= Role::Member.rank());
        }
    }

    #[test]
    fn test_publish_course_requires_moderator() {
        assert_eq!(Permission::PublishCourse.default_min_role(), Role::Moderator);
    }
}
