use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::{ALL_PERMISSIONS, Permission, PermissionMatrix, Role, query};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{role}' lacks permission '{permission}'")]
    Forbidden { role: Role, permission: String },
}

/// Authorize `role` for `required`.
///
/// Same decision as [`query::has_permission`], shaped for `?` at call sites
/// that must stop on denial.
pub fn authorize(role: Role, required: &str) -> Result<(), AuthzError> {
    if query::has_permission(role, required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            role,
            permission: required.to_string(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    /// The permission that was being checked.
    pub required_permission: String,

    /// The role the decision was made for.
    pub role: Role,

    /// Whether the authorization was granted.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// Keys the role is granted, in matrix order.
    pub allowed_permissions: Vec<&'static str>,

    /// If denied, this explains what was missing.
    pub denial_reason: Option<DenialReason>,
}

/// Detailed reason why authorization was denied.
#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    /// Roles whose row grants the key.
    pub granting_roles: Vec<Role>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// The role has no row in the matrix.
    UndefinedRole,
    /// The key is not part of the enumerated key set.
    UnknownPermission,
    /// The row defines the key as `false`.
    MissingPermission,
}

/// Explain why `role` is (or is not) granted `required`.
///
/// Answers "why was this allowed/denied?" without changing the decision:
/// `granted` always equals [`query::has_permission`].
pub fn explain_authorization(role: Role, required: &str) -> AuthorizationExplanation {
    let matrix = PermissionMatrix::STANDARD;
    let allowed = query::allowed_permissions(role);

    let denial = match matrix.lookup(role, required) {
        Some(true) => None,
        Some(false) => Some((
            DenialKind::MissingPermission,
            format!("Role '{role}' is not granted '{required}'"),
        )),
        None if matrix.row(role).is_none() => Some((
            DenialKind::UndefinedRole,
            format!("Role '{role}' has no permission row; every key is denied"),
        )),
        None => Some((
            DenialKind::UnknownPermission,
            format!("'{required}' is not a recognized permission key"),
        )),
    };

    match denial {
        None => AuthorizationExplanation {
            required_permission: required.to_string(),
            role,
            granted: true,
            reason: format!("Role '{role}' is granted '{required}'"),
            allowed_permissions: allowed,
            denial_reason: None,
        },
        Some((kind, message)) => {
            let granting_roles: Vec<Role> = matrix
                .defined_roles()
                .filter(|r| query::has_permission(*r, required))
                .collect();

            tracing::debug!(%role, permission = required, ?kind, "authorization denied");

            AuthorizationExplanation {
                required_permission: required.to_string(),
                role,
                granted: false,
                reason: message.clone(),
                allowed_permissions: allowed,
                denial_reason: Some(DenialReason {
                    kind,
                    message,
                    granting_roles,
                }),
            }
        }
    }
}

/// Role definition with its granted permissions (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub permissions: Vec<&'static str>,
    pub description: &'static str,
}

/// Permission definition (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDefinition {
    pub name: &'static str,
    pub description: String,
    pub category: String,
}

/// Registry of all roles and permission keys.
///
/// A complete, serializable view of the RBAC table for admin screens and audits.
#[derive(Debug, Clone, Serialize)]
pub struct RbacRegistry {
    pub roles: BTreeMap<&'static str, RoleDefinition>,
    pub permissions: Vec<PermissionDefinition>,
}

impl RbacRegistry {
    /// Build the registry from the standard matrix.
    pub fn standard() -> Self {
        let roles = Role::ALL
            .into_iter()
            .map(|role| {
                (
                    role.as_str(),
                    RoleDefinition {
                        role,
                        permissions: query::allowed_permissions(role),
                        description: role_description(role),
                    },
                )
            })
            .collect();

        let permissions = ALL_PERMISSIONS
            .iter()
            .copied()
            .map(|name| {
                let perm = Permission::new(name);
                PermissionDefinition {
                    name,
                    description: permission_description(&perm),
                    category: perm.resource().to_string(),
                }
            })
            .collect();

        Self { roles, permissions }
    }
}

fn role_description(role: Role) -> &'static str {
    match role {
        Role::SuperAdmin => "Platform operator with every permission, including API keys and system limits",
        Role::CompanyAdmin => "Company owner with full access within the company",
        Role::Accountant => "Runs payroll and compliance filings; cannot approve payroll or manage billing",
        Role::Staff => "Employee access to payslips, documents and compliance status",
        Role::ReadOnly => "View-only access; the default before a membership is resolved",
        Role::SupportStaff => "Helpdesk agent; no company permissions are defined",
    }
}

fn permission_description(perm: &Permission) -> String {
    let resource = perm.resource();
    match perm.action() {
        Some("view") => format!("View {resource}"),
        Some("edit") => format!("Edit {resource}"),
        Some("create") => format!("Create {resource}"),
        Some("delete") => format!("Delete {resource}"),
        Some(action) => format!("{} ({resource})", action.replace('-', " ")),
        None => resource.to_string(),
    }
}
