use compliancehub_auth::{CompanyMembership, Role};

/// The (role, company) pair a session acts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveAccess<C> {
    pub role: Role,
    pub company: C,
}

/// Pick the effective role and company from a membership list.
///
/// - A `super_admin` membership wins, together with its own company.
/// - Otherwise the first membership wins; an unset role becomes `read_only`.
/// - An empty list resolves to `None` and the caller keeps its current values.
pub fn resolve_effective_access<C: Clone>(
    memberships: &[CompanyMembership<C>],
) -> Option<EffectiveAccess<C>> {
    let chosen = memberships
        .iter()
        .find(|m| m.role == Some(Role::SuperAdmin))
        .or_else(|| memberships.first())?;

    Some(EffectiveAccess {
        role: chosen.role_or_default(),
        company: chosen.company.clone(),
    })
}
