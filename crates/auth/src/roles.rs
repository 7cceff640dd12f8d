use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role used for RBAC.
///
/// The set is closed. Authorization never compares roles with each other; every
/// decision is a lookup in the permission matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator with access across every company.
    SuperAdmin,
    /// Full access within the owning company.
    CompanyAdmin,
    Accountant,
    Staff,
    /// Default role for sessions without a resolved membership.
    #[default]
    ReadOnly,
    /// Helpdesk agent. Has no row in the permission matrix.
    SupportStaff,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::CompanyAdmin,
        Role::Accountant,
        Role::Staff,
        Role::ReadOnly,
        Role::SupportStaff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::CompanyAdmin => "company_admin",
            Role::Accountant => "accountant",
            Role::Staff => "staff",
            Role::ReadOnly => "read_only",
            Role::SupportStaff => "support_staff",
        }
    }

    /// Parse a role name, returning `None` for blank or unrecognized input.
    pub fn parse(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn unknown_and_blank_names_do_not_parse() {
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("owner"), None);
        assert_eq!(Role::parse("SUPER_ADMIN"), None);
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&Role::CompanyAdmin).unwrap();
        assert_eq!(json, "\"company_admin\"");
        let role: Role = serde_json::from_str("\"support_staff\"").unwrap();
        assert_eq!(role, Role::SupportStaff);
    }

    #[test]
    fn default_role_is_read_only() {
        assert_eq!(Role::default(), Role::ReadOnly);
    }
}
