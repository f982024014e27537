//! Repository layer for data access.
//!
//! Each store is a thin view over the shared [`Database`](crate::infra::Database);
//! every mutating call is one persisted write.

mod account_repository;
mod delete_request_repository;
mod resource_repository;
mod session_repository;

pub use account_repository::{AccountRepository, AccountStore};
pub use delete_request_repository::{DeleteRequestRepository, DeleteRequestStore};
pub use resource_repository::{ResourceRepository, ResourceStore};
pub use session_repository::{SessionRepository, SessionStore};

#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use delete_request_repository::MockDeleteRequestRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use resource_repository::MockResourceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use session_repository::MockSessionRepository;
