//! Role-tagged navigation tables and the single filter every surface uses.

use serde::Serialize;

use compliancehub_auth::Role;
use compliancehub_auth::Role::{
    Accountant, CompanyAdmin, ReadOnly, Staff, SuperAdmin, SupportStaff,
};

/// One navigation destination and the roles allowed to see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub path: &'static str,
    pub roles: &'static [Role],
}

impl NavEntry {
    pub fn is_visible_to(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

const EVERYONE: &[Role] = &[SuperAdmin, CompanyAdmin, Accountant, Staff, ReadOnly, SupportStaff];
const COMPANY_MEMBERS: &[Role] = &[SuperAdmin, CompanyAdmin, Accountant, Staff, ReadOnly];
const FINANCE: &[Role] = &[SuperAdmin, CompanyAdmin, Accountant];
const ADMINS: &[Role] = &[SuperAdmin, CompanyAdmin];
const PLATFORM: &[Role] = &[SuperAdmin, SupportStaff];
const TICKET_RAISERS: &[Role] = &[CompanyAdmin, Accountant, Staff, ReadOnly];

const fn entry(
    id: &'static str,
    label: &'static str,
    path: &'static str,
    roles: &'static [Role],
) -> NavEntry {
    NavEntry {
        id,
        label,
        path,
        roles,
    }
}

/// Desktop sidebar, in display order.
pub const SIDEBAR_NAV: &[NavEntry] = &[
    entry("home", "Home", "/dashboard", EVERYONE),
    entry("companies", "Companies", "/admin/companies", PLATFORM),
    entry("employees", "Employees", "/employees", FINANCE),
    entry("compliance", "Compliance", "/compliance", COMPANY_MEMBERS),
    entry("payroll", "Payroll", "/payroll", COMPANY_MEMBERS),
    entry("documents", "Documents", "/documents", FINANCE),
    entry("reports", "Reports", "/reports", FINANCE),
    entry("billing", "Billing", "/billing", ADMINS),
    entry("my-tickets", "My Tickets", "/support/tickets", TICKET_RAISERS),
    entry("support-queue", "Support Queue", "/support/queue", PLATFORM),
    entry("learn", "Learn", "/learn", EVERYONE),
];

/// Mobile bottom bar, in display order.
pub const MOBILE_NAV: &[NavEntry] = &[
    entry("home", "Home", "/dashboard", EVERYONE),
    entry("companies", "Companies", "/admin/companies", PLATFORM),
    entry("compliance", "Compliance", "/compliance", COMPANY_MEMBERS),
    entry("payroll", "Payroll", "/payroll", COMPANY_MEMBERS),
    entry("my-tickets", "Tickets", "/support/tickets", TICKET_RAISERS),
    entry("support-queue", "Queue", "/support/queue", PLATFORM),
    entry("learn", "Learn", "/learn", EVERYONE),
];

/// Settings hub sections, in display order.
pub const SETTINGS_NAV: &[NavEntry] = &[
    entry("profile", "Profile", "/settings/profile", EVERYONE),
    entry("company", "Company Profile", "/settings/company", ADMINS),
    entry("team", "Team & Roles", "/settings/team", ADMINS),
    entry("billing", "Billing & Plan", "/settings/billing", ADMINS),
    entry("api-keys", "API Keys", "/settings/api-keys", &[SuperAdmin]),
    entry("feature-flags", "Feature Flags", "/settings/feature-flags", &[SuperAdmin]),
    entry("notifications", "Notifications", "/settings/notifications", EVERYONE),
    entry("security", "Security", "/settings/security", EVERYONE),
];

/// Entries whose role tags contain `role`, in their original order.
pub fn filter_nav(entries: &[NavEntry], role: Role) -> Vec<&NavEntry> {
    entries.iter().filter(|e| e.is_visible_to(role)).collect()
}

/// [`filter_nav`] for a raw role name; unknown names see nothing.
pub fn filter_nav_named<'a>(entries: &'a [NavEntry], role: &str) -> Vec<&'a NavEntry> {
    match Role::parse(role) {
        Some(role) => filter_nav(entries, role),
        None => {
            tracing::debug!(role, "unknown role; hiding all navigation");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn labels(entries: Vec<&NavEntry>) -> Vec<&'static str> {
        entries.into_iter().map(|e| e.label).collect()
    }

    #[test]
    fn staff_sidebar() {
        assert_eq!(
            labels(filter_nav(SIDEBAR_NAV, Staff)),
            vec!["Home", "Compliance", "Payroll", "My Tickets", "Learn"]
        );
    }

    #[test]
    fn support_staff_sees_platform_entries_only() {
        assert_eq!(
            labels(filter_nav(SIDEBAR_NAV, SupportStaff)),
            vec!["Home", "Companies", "Support Queue", "Learn"]
        );
    }

    #[test]
    fn super_admin_sidebar_has_everything_but_ticket_raising() {
        let visible = labels(filter_nav(SIDEBAR_NAV, SuperAdmin));
        assert_eq!(visible.len(), SIDEBAR_NAV.len() - 1);
        assert!(!visible.contains(&"My Tickets"));
    }

    #[test]
    fn unknown_role_names_see_nothing_on_every_surface() {
        for surface in [SIDEBAR_NAV, MOBILE_NAV, SETTINGS_NAV] {
            assert!(filter_nav_named(surface, "owner").is_empty());
            assert!(filter_nav_named(surface, "").is_empty());
        }
        assert_eq!(
            filter_nav_named(MOBILE_NAV, "staff"),
            filter_nav(MOBILE_NAV, Staff)
        );
    }

    #[test]
    fn settings_hub_for_company_admin() {
        assert_eq!(
            labels(filter_nav(SETTINGS_NAV, CompanyAdmin)),
            vec![
                "Profile",
                "Company Profile",
                "Team & Roles",
                "Billing & Plan",
                "Notifications",
                "Security",
            ]
        );
    }

    #[test]
    fn surfaces_agree_on_shared_destinations() {
        for mobile in MOBILE_NAV {
            let desktop = SIDEBAR_NAV
                .iter()
                .find(|e| e.id == mobile.id)
                .unwrap_or_else(|| panic!("{} missing from sidebar", mobile.id));
            assert_eq!(desktop.path, mobile.path);
            for role in Role::ALL {
                assert_eq!(
                    desktop.is_visible_to(role),
                    mobile.is_visible_to(role),
                    "{} / {role}",
                    mobile.id
                );
            }
        }
    }

    #[test]
    fn tables_are_well_formed() {
        for surface in [SIDEBAR_NAV, MOBILE_NAV, SETTINGS_NAV] {
            let ids: HashSet<&str> = surface.iter().map(|e| e.id).collect();
            assert_eq!(ids.len(), surface.len());
            assert!(surface.iter().all(|e| !e.roles.is_empty()));
        }
    }

    #[test]
    fn entries_serialize_role_tags_by_name() {
        let json = serde_json::to_value(SETTINGS_NAV[4]).unwrap();
        assert_eq!(json["roles"], serde_json::json!(["super_admin"]));
    }
}
