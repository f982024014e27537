//! Current-session persistence.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;

use crate::infra::Database;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Stores which account is acting in the current session.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Acting account id, if any
    async fn current(&self) -> AppResult<Option<Uuid>>;

    /// Replace the acting account (None signs out)
    async fn set_current(&self, account_id: Option<Uuid>) -> AppResult<()>;
}

/// Snapshot-backed implementation of SessionRepository
pub struct SessionStore {
    db: Arc<Database>,
}

impl SessionStore {
    /// Create new repository instance
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn current(&self) -> AppResult<Option<Uuid>> {
        Ok(self.db.read(|s| s.session).await)
    }

    async fn set_current(&self, account_id: Option<Uuid>) -> AppResult<()> {
        self.db
            .write(move |s| {
                s.session = account_id;
                Ok(())
            })
            .await
    }
}
