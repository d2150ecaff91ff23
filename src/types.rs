/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Profile roles, ordered from least to most privileged.
///
/// Stored as snake_case text in the profiles table. All role checks go
/// through `Role::can` instead of comparing raw strings in handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Admin,
    SuperAdmin,
}

/// Actions a role may or may not perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ViewAcademy,
    ManageAthletes,
    ManageBilling,
    ManagePlatform,
}

impl Role {
    /// Parse a role stored as text. Unknown values fall back to the least
    /// privileged role rather than failing the request.
    pub fn parse(s: &str) -> Role {
        match s {
            "admin" => Role::Admin,
            "super_admin" => Role::SuperAdmin,
            "member" => Role::Member,
            other => {
                tracing::warn!("Unknown role '{}' in profile row, treating as member", other);
                Role::Member
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Capability check used by route guards and handlers
    pub fn can(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewAcademy => true,
            Capability::ManageAthletes => *self >= Role::Admin,
            Capability::ManageBilling => *self >= Role::Admin,
            Capability::ManagePlatform => *self == Role::SuperAdmin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Member < Role::Admin);
        assert!(Role::Admin < Role::SuperAdmin);
    }

    #[test]
    fn test_member_capabilities() {
        assert!(Role::Member.can(Capability::ViewAcademy));
        assert!(!Role::Member.can(Capability::ManageAthletes));
        assert!(!Role::Member.can(Capability::ManageBilling));
        assert!(!Role::Member.can(Capability::ManagePlatform));
    }

    #[test]
    fn test_admin_capabilities() {
        assert!(Role::Admin.can(Capability::ManageAthletes));
        assert!(Role::Admin.can(Capability::ManageBilling));
        assert!(!Role::Admin.can(Capability::ManagePlatform));
    }

    #[test]
    fn test_super_admin_capabilities() {
        assert!(Role::SuperAdmin.can(Capability::ViewAcademy));
        assert!(Role::SuperAdmin.can(Capability::ManageAthletes));
        assert!(Role::SuperAdmin.can(Capability::ManagePlatform));
    }

    #[test]
    fn test_parse_unknown_role_falls_back_to_member() {
        assert_eq!(Role::parse("owner"), Role::Member);
        assert_eq!(Role::parse("super_admin"), Role::SuperAdmin);
        assert_eq!(Role::parse("admin"), Role::Admin);
    }

    #[test]
    fn test_role_serde_round_trip() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::SuperAdmin);
    }
}
