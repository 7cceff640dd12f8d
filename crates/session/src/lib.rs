//! `compliancehub-session`
//!
//! **Responsibility:** turn an authenticated user's company memberships into the
//! single effective (role, company) pair for the session, persist the session
//! fields, and expose them to guard consumers.
//!
//! The identity service is a seam ([`IdentityClient`]); this crate performs no
//! network IO of its own.

pub mod config;
pub mod context;
pub mod identity;
pub mod resolver;
pub mod session;
pub mod storage;

pub use config::ClientConfig;
pub use context::{SessionContext, SessionError};
pub use identity::{
    AuthTokens, Company, CurrentUser, Credentials, IdentityClient, IdentityError, Membership,
    Registration, User, UserStatus,
};
pub use resolver::{EffectiveAccess, resolve_effective_access};
pub use session::{Session, SubscriptionTier, UnknownSubscriptionTier};
pub use storage::{ClientStorage, FileStorage, InMemoryStorage, StorageError, keys};
