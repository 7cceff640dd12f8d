use tokio::sync::watch;

use compliancehub_auth::{Role, has_all_permissions, has_any_permission, has_permission};

/// What a guarded element needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// A single permission key.
    One(&'static str),
    /// At least one of the keys (an empty list never passes).
    Any(Vec<&'static str>),
    /// Every key (an empty list always passes).
    All(Vec<&'static str>),
}

impl Requirement {
    pub fn is_met_by(&self, role: Role) -> bool {
        match self {
            Requirement::One(key) => has_permission(role, key),
            Requirement::Any(keys) => has_any_permission(role, keys.as_slice()),
            Requirement::All(keys) => has_all_permissions(role, keys.as_slice()),
        }
    }
}

/// Declarative permission gate.
///
/// Re-evaluated on every call, so a role change is reflected on the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGuard {
    requirement: Requirement,
}

impl PermissionGuard {
    pub fn new(requirement: Requirement) -> Self {
        Self { requirement }
    }

    pub fn require(key: &'static str) -> Self {
        Self::new(Requirement::One(key))
    }

    pub fn require_any(keys: impl IntoIterator<Item = &'static str>) -> Self {
        Self::new(Requirement::Any(keys.into_iter().collect()))
    }

    pub fn require_all(keys: impl IntoIterator<Item = &'static str>) -> Self {
        Self::new(Requirement::All(keys.into_iter().collect()))
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    pub fn allows(&self, role: Role) -> bool {
        self.requirement.is_met_by(role)
    }

    /// `content` when authorized, otherwise `fallback`. `None` means "render nothing".
    pub fn render<T>(&self, role: Role, content: T, fallback: Option<T>) -> Option<T> {
        if self.allows(role) {
            Some(content)
        } else {
            tracing::trace!(%role, requirement = ?self.requirement, "guard rendered fallback");
            fallback
        }
    }

    /// Like [`Self::render`] but only builds the branch that is shown.
    pub fn render_with<T>(
        &self,
        role: Role,
        content: impl FnOnce() -> T,
        fallback: Option<impl FnOnce() -> T>,
    ) -> Option<T> {
        if self.allows(role) {
            Some(content())
        } else {
            fallback.map(|f| f())
        }
    }

    /// Bind this guard to a live role source.
    pub fn bind(self, role: watch::Receiver<Role>) -> RoleBoundGuard {
        RoleBoundGuard { guard: self, role }
    }
}

/// A guard that always evaluates against the latest effective role.
#[derive(Debug, Clone)]
pub struct RoleBoundGuard {
    guard: PermissionGuard,
    role: watch::Receiver<Role>,
}

impl RoleBoundGuard {
    pub fn current_role(&self) -> Role {
        *self.role.borrow()
    }

    pub fn allows(&self) -> bool {
        self.guard.allows(self.current_role())
    }

    pub fn render<T>(&self, content: T, fallback: Option<T>) -> Option<T> {
        self.guard.render(self.current_role(), content, fallback)
    }

    /// Wait for the next role change and return the new decision.
    ///
    /// Returns `None` once the session owner is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        self.role.changed().await.ok()?;
        Some(self.guard.allows(*self.role.borrow_and_update()))
    }
}
