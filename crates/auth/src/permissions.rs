use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission key of the form `resource:action` (e.g. `payroll:run`).
///
/// Keys are not freeform: anything absent from the permission matrix is denied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

macro_rules! permission_keys {
    ($($name:ident => $key:literal),+ $(,)?) => {
        impl Permission {
            $(pub const $name: Permission = Permission(Cow::Borrowed($key));)+
        }

        /// Every permission key, grouped by resource in table order.
        pub const ALL_PERMISSIONS: &[&str] = &[$($key),+];
    };
}

permission_keys! {
    COMPANY_EDIT => "company:edit",
    COMPANY_VIEW => "company:view",
    BILLING_MANAGE => "billing:manage",
    BILLING_VIEW => "billing:view",
    USERS_INVITE => "users:invite",
    USERS_ASSIGN_ROLES => "users:assign-roles",
    USERS_REMOVE => "users:remove",
    USERS_VIEW => "users:view",
    USERS_EDIT => "users:edit",
    EMPLOYEES_CREATE => "employees:create",
    EMPLOYEES_EDIT => "employees:edit",
    EMPLOYEES_DELETE => "employees:delete",
    EMPLOYEES_VIEW => "employees:view",
    PAYROLL_RUN => "payroll:run",
    PAYROLL_EDIT => "payroll:edit",
    PAYROLL_APPROVE => "payroll:approve",
    PAYROLL_VIEW => "payroll:view",
    PAYROLL_DOWNLOAD_PAYSLIPS => "payroll:download-payslips",
    COMPLIANCE_CALCULATE => "compliance:calculate",
    COMPLIANCE_FILE => "compliance:file",
    COMPLIANCE_UPLOAD_RECEIPTS => "compliance:upload-receipts",
    COMPLIANCE_VIEW => "compliance:view",
    DOCUMENTS_UPLOAD => "documents:upload",
    DOCUMENTS_DOWNLOAD => "documents:download",
    DOCUMENTS_DELETE => "documents:delete",
    DOCUMENTS_VIEW => "documents:view",
    REPORTS_GENERATE => "reports:generate",
    REPORTS_EXPORT => "reports:export",
    API_MANAGE_KEYS => "api:manage-keys",
    API_USE => "api:use",
    SYSTEM_AUDIT_LOGS => "system:audit-logs",
    SYSTEM_FEATURE_FLAGS => "system:feature-flags",
    SYSTEM_OVERRIDE_LIMITS => "system:override-limits",
}

/// Resources that permission keys are grouped under.
pub const RESOURCES: &[&str] = &[
    "company",
    "billing",
    "users",
    "employees",
    "payroll",
    "compliance",
    "documents",
    "reports",
    "api",
    "system",
];

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before `:`, or the whole key when there is no separator.
    pub fn resource(&self) -> &str {
        self.as_str().split_once(':').map_or(self.as_str(), |(r, _)| r)
    }

    /// The part after `:`, if any.
    pub fn action(&self) -> Option<&str> {
        self.as_str().split_once(':').map(|(_, a)| a)
    }

    /// Whether this key is part of the enumerated key set.
    pub fn is_known(&self) -> bool {
        ALL_PERMISSIONS.iter().any(|key| *key == self.as_str())
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
