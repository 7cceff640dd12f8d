use serde::{Deserialize, Deserializer, Serialize};

use crate::Role;

/// A user's membership in one company, as reported by the identity service.
///
/// Generic over the company payload so this crate stays free of company
/// profile details. The role is `None` when the service sent a blank or
/// unrecognized value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMembership<C> {
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
    pub company: C,
}

impl<C> CompanyMembership<C> {
    pub fn new(role: Role, company: C) -> Self {
        Self {
            role: Some(role),
            company,
        }
    }

    /// The membership's role, or `read_only` when unset.
    pub fn role_or_default(&self) -> Role {
        self.role.unwrap_or_default()
    }
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match Role::parse(trimmed) {
        Some(role) => Ok(Some(role)),
        None => {
            tracing::warn!(role = trimmed, "ignoring unrecognized membership role");
            Ok(None)
        }
    }
}
