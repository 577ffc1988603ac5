//! `trattoria-core`: identifiers and the shared error model.
//!
//! Nothing in here knows about roles, HTTP or storage.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
