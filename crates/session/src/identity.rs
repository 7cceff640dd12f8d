//! Identity service DTOs and the client seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use compliancehub_auth::CompanyMembership;
use compliancehub_core::{CompanyId, UserId};

/// User account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// User is active and can sign in.
    #[default]
    Active,
    /// Registered but email not yet verified.
    Pending,
    /// Suspended by an administrator.
    Suspended,
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub status: UserStatus,
}

/// Company profile carried on a membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    /// FIRS tax identification number.
    #[serde(default)]
    pub tin: Option<String>,
    /// CAC registration number.
    #[serde(default)]
    pub rc_number: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Company {
    /// A company with only the required fields set.
    pub fn new(id: CompanyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tin: None,
            rc_number: None,
            industry: None,
            size: None,
            state: None,
            country: None,
        }
    }
}

/// A membership as delivered by the identity service.
pub type Membership = CompanyMembership<Company>;

/// Response of the "current user" lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub user: User,
    /// Membership records in the order the service returned them.
    #[serde(default)]
    pub memberships: Vec<Membership>,
}

/// Access/refresh token pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl core::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for Registration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("network error: {0}")]
    Network(String),

    #[error("token rejected or expired")]
    Unauthorized,

    #[error("identity service error ({0}): {1}")]
    Api(u16, String),

    #[error("malformed identity response: {0}")]
    Parse(String),
}

/// The external authentication/identity service.
///
/// Implementations own transport and token signing; none of these calls are
/// retried by the session layer.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthTokens, IdentityError>;

    async fn register(&self, registration: &Registration) -> Result<AuthTokens, IdentityError>;

    /// Revoke the refresh token remotely.
    async fn logout(&self, refresh_token: &str) -> Result<(), IdentityError>;

    /// The user behind `access_token`, with their company memberships.
    async fn current_user(&self, access_token: &str) -> Result<CurrentUser, IdentityError>;
}

#[async_trait]
impl<T: IdentityClient + ?Sized> IdentityClient for std::sync::Arc<T> {
    async fn login(&self, credentials: &Credentials) -> Result<AuthTokens, IdentityError> {
        (**self).login(credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthTokens, IdentityError> {
        (**self).register(registration).await
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), IdentityError> {
        (**self).logout(refresh_token).await
    }

    async fn current_user(&self, access_token: &str) -> Result<CurrentUser, IdentityError> {
        (**self).current_user(access_token).await
    }
}
