//! `compliancehub-auth` — role-based access control for ComplianceHub.
//!
//! Pure data and pure functions: the static permission matrix, the query API
//! over it, and audit helpers. No IO, no storage, no rendering.

pub mod authorize;
pub mod matrix;
pub mod membership;
pub mod permissions;
pub mod query;
pub mod roles;

pub use authorize::{
    AuthorizationExplanation, AuthzError, DenialKind, RbacRegistry, authorize,
    explain_authorization,
};
pub use matrix::PermissionMatrix;
pub use membership::CompanyMembership;
pub use permissions::{ALL_PERMISSIONS, Permission, RESOURCES};
pub use query::{
    allowed_permissions, denied_permissions, has_all_permissions, has_any_permission,
    has_permission, has_permission_named,
};
pub use roles::{Role, UnknownRole};
