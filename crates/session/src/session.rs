//! Session identity state.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use compliancehub_auth::Role;

use crate::identity::{Company, User};

/// Subscription plan selected during onboarding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Starter,
    Professional,
    Enterprise,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 4] = [
        SubscriptionTier::Free,
        SubscriptionTier::Starter,
        SubscriptionTier::Professional,
        SubscriptionTier::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Starter => "starter",
            SubscriptionTier::Professional => "professional",
            SubscriptionTier::Enterprise => "enterprise",
        }
    }
}

impl core::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown subscription tier '{0}'")]
pub struct UnknownSubscriptionTier(pub String);

impl FromStr for SubscriptionTier {
    type Err = UnknownSubscriptionTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubscriptionTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| UnknownSubscriptionTier(s.to_string()))
    }
}

/// Everything the application knows about the signed-in user.
///
/// `Session::default()` is the signed-out state: no user, no company,
/// `read_only`, no tokens, onboarding incomplete, no subscription tier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub user: Option<User>,
    /// At most one company, even when the user belongs to several.
    pub company: Option<Company>,
    pub user_role: Role,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub onboarding_complete: bool,
    pub user_subscription_tier: Option<SubscriptionTier>,
    /// When memberships were last resolved successfully.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// A token is present but the user has not been loaded yet.
    pub fn needs_resolution(&self) -> bool {
        self.access_token.is_some() && self.user.is_none()
    }
}
