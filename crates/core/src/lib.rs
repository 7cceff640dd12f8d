//! `compliancehub-core` — shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no storage concerns).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::{CompanyId, UserId};
