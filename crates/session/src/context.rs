//! Ambient session state and its mutators.

use chrono::Utc;
use thiserror::Error;
use tokio::sync::watch;

use compliancehub_auth::Role;

use crate::identity::{
    AuthTokens, Company, Credentials, IdentityClient, IdentityError, Registration, User,
};
use crate::resolver::resolve_effective_access;
use crate::session::{Session, SubscriptionTier};
use crate::storage::{ClientStorage, StorageError, keys};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Owner of the session identity.
///
/// The only writer of [`Session`]; guard consumers read it through accessors or
/// follow role changes through [`SessionContext::watch_role`]. Persisted fields
/// are written to storage before the in-memory value changes, and are present
/// in storage iff the in-memory value is set and not the default.
pub struct SessionContext<C, S> {
    client: C,
    storage: S,
    session: Session,
    is_loading: bool,
    error: Option<String>,
    role_tx: watch::Sender<Role>,
}

impl<C, S> SessionContext<C, S>
where
    C: IdentityClient,
    S: ClientStorage,
{
    /// An empty (signed-out) context. Nothing is read from storage.
    pub fn new(client: C, storage: S) -> Self {
        let (role_tx, _) = watch::channel(Role::default());
        Self {
            client,
            storage,
            session: Session::default(),
            is_loading: false,
            error: None,
            role_tx,
        }
    }

    /// Load persisted fields without contacting the identity service.
    ///
    /// Unparseable persisted values are discarded and removed from storage.
    pub fn load(client: C, storage: S) -> Result<Self, SessionError> {
        let mut ctx = Self::new(client, storage);

        ctx.session.access_token = ctx.storage.get(keys::ACCESS_TOKEN)?;
        ctx.session.refresh_token = ctx.storage.get(keys::REFRESH_TOKEN)?;

        if let Some(raw) = ctx.storage.get(keys::USER_ROLE)? {
            match Role::parse(&raw) {
                Some(role) => ctx.replace_role(role),
                None => {
                    tracing::warn!(role = %raw, "discarding unrecognized persisted role");
                    ctx.storage.remove(keys::USER_ROLE)?;
                }
            }
        }

        ctx.session.onboarding_complete = ctx
            .storage
            .get(keys::ONBOARDING_COMPLETE)?
            .is_some_and(|raw| raw == "true");

        if let Some(raw) = ctx.storage.get(keys::USER_SUBSCRIPTION_TIER)? {
            match raw.parse::<SubscriptionTier>() {
                Ok(tier) => ctx.session.user_subscription_tier = Some(tier),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding persisted subscription tier");
                    ctx.storage.remove(keys::USER_SUBSCRIPTION_TIER)?;
                }
            }
        }

        Ok(ctx)
    }

    /// Application start: load persisted fields and, if a token survived,
    /// re-derive the effective role and company.
    pub async fn restore(client: C, storage: S) -> Result<Self, SessionError> {
        let mut ctx = Self::load(client, storage)?;
        ctx.ensure_resolved().await;
        Ok(ctx)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn company(&self) -> Option<&Company> {
        self.session.company.as_ref()
    }

    pub fn user_role(&self) -> Role {
        self.session.user_role
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.session.refresh_token.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message of the last failed identity call, cleared when a new one starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn onboarding_complete(&self) -> bool {
        self.session.onboarding_complete
    }

    pub fn user_subscription_tier(&self) -> Option<SubscriptionTier> {
        self.session.user_subscription_tier
    }

    /// Receiver that observes every effective-role change.
    pub fn watch_role(&self) -> watch::Receiver<Role> {
        self.role_tx.subscribe()
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), SessionError> {
        self.begin_request();
        let result = self.client.login(credentials).await;
        let tokens = self.finish_request(result)?;
        tracing::info!(email = %credentials.email, "login succeeded");
        self.apply_tokens(tokens).await
    }

    pub async fn register(&mut self, registration: &Registration) -> Result<(), SessionError> {
        self.begin_request();
        let result = self.client.register(registration).await;
        let tokens = self.finish_request(result)?;
        tracing::info!(email = %registration.email, "registration succeeded");
        self.apply_tokens(tokens).await
    }

    /// Adopt a token pair obtained elsewhere (e.g. email verification) and
    /// resolve the session from it.
    ///
    /// If either token cannot be persisted, both are dropped from storage and
    /// memory so a later restart cannot pick up half a pair.
    pub async fn apply_tokens(&mut self, tokens: AuthTokens) -> Result<(), SessionError> {
        if let Err(err) = self.persist_tokens(&tokens) {
            tracing::warn!(error = %err, "failed to persist tokens; discarding token pair");
            for key in [keys::ACCESS_TOKEN, keys::REFRESH_TOKEN] {
                if let Err(cleanup) = self.storage.remove(key) {
                    tracing::warn!(key, error = %cleanup, "failed to clear partially written token");
                }
            }
            self.session.access_token = None;
            self.session.refresh_token = None;
            return Err(err.into());
        }
        self.session.access_token = Some(tokens.access_token);
        self.session.refresh_token = Some(tokens.refresh_token);
        self.refresh_identity().await;
        Ok(())
    }

    /// Resolve only when a token is present and the user has not been loaded.
    ///
    /// Safe to call on every render; a previous failure is retried lazily here.
    pub async fn ensure_resolved(&mut self) {
        if self.session.needs_resolution() {
            self.refresh_identity().await;
        }
    }

    /// Fetch the current user and re-derive the effective role and company.
    ///
    /// Failures are logged and recorded in [`Self::error`]; session fields keep
    /// their current values.
    pub async fn refresh_identity(&mut self) {
        let Some(token) = self.session.access_token.clone() else {
            return;
        };

        self.begin_request();
        let result = self.client.current_user(&token).await;
        self.is_loading = false;

        let current = match result {
            Ok(current) => current,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch current user");
                self.error = Some(err.to_string());
                return;
            }
        };

        match resolve_effective_access(&current.memberships) {
            Some(access) => {
                tracing::debug!(
                    user_id = %current.user.id,
                    role = %access.role,
                    company_id = %access.company.id,
                    memberships = current.memberships.len(),
                    "resolved effective access"
                );
                if let Err(err) = self.set_user_role(access.role) {
                    tracing::warn!(error = %err, "failed to persist resolved role");
                    self.replace_role(access.role);
                }
                self.session.company = Some(access.company);
            }
            None => {
                tracing::debug!(user_id = %current.user.id, "no company memberships; keeping current role");
            }
        }

        self.session.user = Some(current.user);
        self.session.resolved_at = Some(Utc::now());
    }

    /// Sign out locally and remotely.
    ///
    /// Total and idempotent: the local state is always reset, whatever the
    /// remote call or storage does.
    pub async fn logout(&mut self) {
        if let Some(refresh_token) = self.session.refresh_token.clone() {
            if let Err(err) = self.client.logout(&refresh_token).await {
                tracing::warn!(error = %err, "remote logout failed; clearing local session anyway");
            }
        }

        for key in keys::ALL {
            if let Err(err) = self.storage.remove(key) {
                tracing::warn!(key, error = %err, "failed to clear persisted session field");
            }
        }

        self.session = Session::default();
        self.is_loading = false;
        self.error = None;
        self.replace_role(Role::default());
    }

    /// Provisional override, e.g. from the onboarding role-selection screen.
    pub fn set_user_role(&mut self, role: Role) -> Result<(), StorageError> {
        if role == Role::default() {
            self.storage.remove(keys::USER_ROLE)?;
        } else {
            self.storage.set(keys::USER_ROLE, role.as_str())?;
        }
        self.replace_role(role);
        Ok(())
    }

    /// Provisional override after a create-company call succeeds.
    pub fn set_company(&mut self, company: Option<Company>) {
        self.session.company = company;
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.session.user = user;
    }

    pub fn set_onboarding_complete(&mut self, complete: bool) -> Result<(), StorageError> {
        if complete {
            self.storage.set(keys::ONBOARDING_COMPLETE, "true")?;
        } else {
            self.storage.remove(keys::ONBOARDING_COMPLETE)?;
        }
        self.session.onboarding_complete = complete;
        Ok(())
    }

    pub fn set_user_subscription_tier(
        &mut self,
        tier: Option<SubscriptionTier>,
    ) -> Result<(), StorageError> {
        match tier {
            Some(tier) => self.storage.set(keys::USER_SUBSCRIPTION_TIER, tier.as_str())?,
            None => self.storage.remove(keys::USER_SUBSCRIPTION_TIER)?,
        }
        self.session.user_subscription_tier = tier;
        Ok(())
    }

    fn persist_tokens(&self, tokens: &AuthTokens) -> Result<(), StorageError> {
        self.storage.set(keys::ACCESS_TOKEN, &tokens.access_token)?;
        self.storage.set(keys::REFRESH_TOKEN, &tokens.refresh_token)
    }

    fn replace_role(&mut self, role: Role) {
        self.session.user_role = role;
        self.role_tx.send_if_modified(|current| {
            if *current == role {
                false
            } else {
                *current = role;
                true
            }
        });
    }

    fn begin_request(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn finish_request<T>(&mut self, result: Result<T, IdentityError>) -> Result<T, SessionError> {
        self.is_loading = false;
        result.map_err(|err| {
            tracing::warn!(error = %err, "identity request failed");
            self.error = Some(err.to_string());
            SessionError::from(err)
        })
    }
}
