//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the admin account tree, owner-scoped resources and delete requests.

pub mod account;
pub mod constants;
pub mod delete_request;
pub mod error;
pub mod hierarchy;
pub mod resource;

pub use account::{Account, AccountRole, AccountStatus, NewAccount, UpdateProfile};
pub use constants::*;
pub use delete_request::{Decision, DeleteRequest, DeleteRequestStatus};
pub use error::{DomainError, DomainResult};
pub use resource::{NewResource, OwnedResource, ResourceContent, ResourceKind, UpdateResource};
