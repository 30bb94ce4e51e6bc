//! userql-core: Shared types, configuration, and error handling for userql.
//!
//! This crate provides the foundational types used across all userql components:
//! - The `User` entity and its create/update inputs
//! - Configuration loading for the GraphQL endpoint
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{GraphqlSettings, UserqlConfig};
pub use error::UserqlError;
pub use types::{NewUser, User, UserId, UserPatch};
