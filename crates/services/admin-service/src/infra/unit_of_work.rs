//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories and runs multi-record mutations
//! (delete request resolution touches the request and its target account)
//! as one persisted check-and-set.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;

use super::db::Database;
use super::snapshot::Snapshot;
use crate::repository::{
    AccountRepository, AccountStore, DeleteRequestRepository, DeleteRequestStore,
    ResourceRepository, ResourceStore, SessionRepository, SessionStore,
};

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to the generic method.
/// For testing, back it with an in-memory [`Database`] or mock the
/// repositories it hands out.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get account repository
    fn accounts(&self) -> Arc<dyn AccountRepository>;

    /// Get owned resource repository
    fn resources(&self) -> Arc<dyn ResourceRepository>;

    /// Get delete request repository
    fn delete_requests(&self) -> Arc<dyn DeleteRequestRepository>;

    /// Get session repository
    fn sessions(&self) -> Arc<dyn SessionRepository>;

    /// Execute a closure against the whole snapshot atomically.
    ///
    /// Changes are persisted and committed when the closure returns `Ok`,
    /// and discarded when it returns `Err`.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Snapshot) -> AppResult<T> + Send,
        T: Send;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: Arc<Database>,
    account_repo: Arc<AccountStore>,
    resource_repo: Arc<ResourceStore>,
    delete_request_repo: Arc<DeleteRequestStore>,
    session_repo: Arc<SessionStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            account_repo: Arc::new(AccountStore::new(db.clone())),
            resource_repo: Arc::new(ResourceStore::new(db.clone())),
            delete_request_repo: Arc::new(DeleteRequestStore::new(db.clone())),
            session_repo: Arc::new(SessionStore::new(db.clone())),
            db,
        }
    }

    pub fn database(&self) -> Arc<Database> {
        self.db.clone()
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.account_repo.clone()
    }

    fn resources(&self) -> Arc<dyn ResourceRepository> {
        self.resource_repo.clone()
    }

    fn delete_requests(&self) -> Arc<dyn DeleteRequestRepository> {
        self.delete_request_repo.clone()
    }

    fn sessions(&self) -> Arc<dyn SessionRepository> {
        self.session_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Snapshot) -> AppResult<T> + Send,
        T: Send,
    {
        self.db.write(f).await
    }
}
