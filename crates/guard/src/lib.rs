//! `compliancehub-guard` — rendering and navigation gates driven by the
//! session's effective role.
//!
//! This crate is renderer-agnostic: a guard chooses between two values, and a
//! navigation filter returns the visible entries.

pub mod guard;
pub mod navigation;

pub use guard::{PermissionGuard, Requirement, RoleBoundGuard};
pub use navigation::{
    MOBILE_NAV, NavEntry, SETTINGS_NAV, SIDEBAR_NAV, filter_nav, filter_nav_named,
};
