//! Permission query functions over the standard matrix.
//!
//! - No IO
//! - No panics
//! - Undefined roles and keys fail closed

use crate::{PermissionMatrix, Role};

/// Whether `role` is granted `key`. Missing rows and missing keys deny.
pub fn has_permission(role: Role, key: &str) -> bool {
    PermissionMatrix::STANDARD.lookup(role, key).unwrap_or(false)
}

/// True iff at least one key is granted. An empty list is `false`.
pub fn has_any_permission<K: AsRef<str>>(role: Role, keys: &[K]) -> bool {
    keys.iter().any(|key| has_permission(role, key.as_ref()))
}

/// True iff every key is granted. An empty list is `true`.
pub fn has_all_permissions<K: AsRef<str>>(role: Role, keys: &[K]) -> bool {
    keys.iter().all(|key| has_permission(role, key.as_ref()))
}

/// Keys granted to `role`, in matrix order.
pub fn allowed_permissions(role: Role) -> Vec<&'static str> {
    row_keys(role, true)
}

/// Keys defined for `role` but not granted, in matrix order.
pub fn denied_permissions(role: Role) -> Vec<&'static str> {
    row_keys(role, false)
}

/// [`has_permission`] for a raw role name; unknown names are denied.
pub fn has_permission_named(role: &str, key: &str) -> bool {
    Role::parse(role).is_some_and(|role| has_permission(role, key))
}

fn row_keys(role: Role, granted: bool) -> Vec<&'static str> {
    PermissionMatrix::STANDARD
        .row(role)
        .map(|row| {
            row.iter()
                .filter(|(_, value)| *value == granted)
                .map(|(key, _)| *key)
                .collect()
        })
        .unwrap_or_default()
}
