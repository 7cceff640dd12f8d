//! Static role × permission-key table.
//!
//! Every defined row lists every key, even when the value is `false`, so that
//! additions show up in review as a one-line diff per role.

use crate::Role;

/// One role's entries, in key-table order.
pub type Row = &'static [(&'static str, bool)];

const SUPER_ADMIN: Row = &[
    ("company:edit", true),
    ("company:view", true),
    ("billing:manage", true),
    ("billing:view", true),
    ("users:invite", true),
    ("users:assign-roles", true),
    ("users:remove", true),
    ("users:view", true),
    ("users:edit", true),
    ("employees:create", true),
    ("employees:edit", true),
    ("employees:delete", true),
    ("employees:view", true),
    ("payroll:run", true),
    ("payroll:edit", true),
    ("payroll:approve", true),
    ("payroll:view", true),
    ("payroll:download-payslips", true),
    ("compliance:calculate", true),
    ("compliance:file", true),
    ("compliance:upload-receipts", true),
    ("compliance:view", true),
    ("documents:upload", true),
    ("documents:download", true),
    ("documents:delete", true),
    ("documents:view", true),
    ("reports:generate", true),
    ("reports:export", true),
    ("api:manage-keys", true),
    ("api:use", true),
    ("system:audit-logs", true),
    ("system:feature-flags", true),
    ("system:override-limits", true),
];

// Differs from SUPER_ADMIN only in the platform-operator keys.
const COMPANY_ADMIN: Row = &[
    ("company:edit", true),
    ("company:view", true),
    ("billing:manage", true),
    ("billing:view", true),
    ("users:invite", true),
    ("users:assign-roles", true),
    ("users:remove", true),
    ("users:view", true),
    ("users:edit", true),
    ("employees:create", true),
    ("employees:edit", true),
    ("employees:delete", true),
    ("employees:view", true),
    ("payroll:run", true),
    ("payroll:edit", true),
    ("payroll:approve", true),
    ("payroll:view", true),
    ("payroll:download-payslips", true),
    ("compliance:calculate", true),
    ("compliance:file", true),
    ("compliance:upload-receipts", true),
    ("compliance:view", true),
    ("documents:upload", true),
    ("documents:download", true),
    ("documents:delete", true),
    ("documents:view", true),
    ("reports:generate", true),
    ("reports:export", true),
    ("api:manage-keys", false),
    ("api:use", true),
    ("system:audit-logs", true),
    ("system:feature-flags", false),
    ("system:override-limits", false),
];

const ACCOUNTANT: Row = &[
    ("company:edit", false),
    ("company:view", true),
    ("billing:manage", false),
    ("billing:view", false),
    ("users:invite", false),
    ("users:assign-roles", false),
    ("users:remove", false),
    ("users:view", true),
    ("users:edit", false),
    ("employees:create", true),
    ("employees:edit", true),
    ("employees:delete", false),
    ("employees:view", true),
    ("payroll:run", true),
    ("payroll:edit", true),
    ("payroll:approve", false),
    ("payroll:view", true),
    ("payroll:download-payslips", true),
    ("compliance:calculate", true),
    ("compliance:file", true),
    ("compliance:upload-receipts", true),
    ("compliance:view", true),
    ("documents:upload", true),
    ("documents:download", true),
    ("documents:delete", false),
    ("documents:view", true),
    ("reports:generate", true),
    ("reports:export", true),
    ("api:manage-keys", false),
    ("api:use", false),
    ("system:audit-logs", false),
    ("system:feature-flags", false),
    ("system:override-limits", false),
];

const STAFF: Row = &[
    ("company:edit", false),
    ("company:view", true),
    ("billing:manage", false),
    ("billing:view", false),
    ("users:invite", false),
    ("users:assign-roles", false),
    ("users:remove", false),
    ("users:view", true),
    ("users:edit", false),
    ("employees:create", false),
    ("employees:edit", false),
    ("employees:delete", false),
    ("employees:view", true),
    ("payroll:run", false),
    ("payroll:edit", false),
    ("payroll:approve", false),
    ("payroll:view", false),
    ("payroll:download-payslips", true),
    ("compliance:calculate", false),
    ("compliance:file", false),
    ("compliance:upload-receipts", false),
    ("compliance:view", true),
    ("documents:upload", false),
    ("documents:download", true),
    ("documents:delete", false),
    ("documents:view", true),
    ("reports:generate", true),
    ("reports:export", false),
    ("api:manage-keys", false),
    ("api:use", false),
    ("system:audit-logs", false),
    ("system:feature-flags", false),
    ("system:override-limits", false),
];

// Same as STAFF except documents:download. That key and reports:export are
// meant to become admin-enableable per company; there is no override source yet.
const READ_ONLY: Row = &[
    ("company:edit", false),
    ("company:view", true),
    ("billing:manage", false),
    ("billing:view", false),
    ("users:invite", false),
    ("users:assign-roles", false),
    ("users:remove", false),
    ("users:view", true),
    ("users:edit", false),
    ("employees:create", false),
    ("employees:edit", false),
    ("employees:delete", false),
    ("employees:view", true),
    ("payroll:run", false),
    ("payroll:edit", false),
    ("payroll:approve", false),
    ("payroll:view", false),
    ("payroll:download-payslips", true),
    ("compliance:calculate", false),
    ("compliance:file", false),
    ("compliance:upload-receipts", false),
    ("compliance:view", true),
    ("documents:upload", false),
    ("documents:download", false),
    ("documents:delete", false),
    ("documents:view", true),
    ("reports:generate", true),
    ("reports:export", false),
    ("api:manage-keys", false),
    ("api:use", false),
    ("system:audit-logs", false),
    ("system:feature-flags", false),
    ("system:override-limits", false),
];

/// Read-only view over the static permission table.
#[derive(Debug, Copy, Clone, Default)]
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// The process-wide matrix.
    pub const STANDARD: PermissionMatrix = PermissionMatrix;

    /// The row for `role`, or `None` when the role has no row (`support_staff`).
    pub fn row(&self, role: Role) -> Option<Row> {
        match role {
            Role::SuperAdmin => Some(SUPER_ADMIN),
            Role::CompanyAdmin => Some(COMPANY_ADMIN),
            Role::Accountant => Some(ACCOUNTANT),
            Role::Staff => Some(STAFF),
            Role::ReadOnly => Some(READ_ONLY),
            Role::SupportStaff => None,
        }
    }

    /// The raw entry for `(role, key)`.
    ///
    /// `None` means "not defined", which callers must treat as a denial.
    pub fn lookup(&self, role: Role, key: &str) -> Option<bool> {
        self.row(role)?
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, granted)| *granted)
    }

    /// Roles that have a row, in table order.
    pub fn defined_roles(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.row(*role).is_some())
    }
}
