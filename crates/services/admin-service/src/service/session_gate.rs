//! Session gate - who is acting, and may they act here.
//!
//! The current session is part of the persisted snapshot, so it survives
//! a restart the same way the directory does.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Account, AccountRole};

use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session gate trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionService: Send + Sync {
    /// The acting account, if any
    async fn current(&self) -> AppResult<Option<Account>>;

    /// Make `account_id` the acting account
    async fn sign_in(&self, account_id: Uuid) -> AppResult<Account>;

    /// Clear the acting account
    async fn sign_out(&self) -> AppResult<()>;

    /// The acting account, or `Unauthorized`
    async fn require_current(&self) -> AppResult<Account>;

    /// The acting account if it holds `role`, otherwise `Forbidden`
    async fn require_role(&self, role: AccountRole) -> AppResult<Account>;
}

/// Concrete implementation of SessionService using Unit of Work.
pub struct SessionGate<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SessionGate<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> SessionService for SessionGate<U> {
    async fn current(&self) -> AppResult<Option<Account>> {
        let Some(account_id) = self.uow.sessions().current().await? else {
            return Ok(None);
        };

        let account = self.uow.accounts().find_by_id(account_id).await?;
        if account.is_none() {
            tracing::warn!(account_id = %account_id, "Session points at a missing account");
        }
        Ok(account)
    }

    async fn sign_in(&self, account_id: Uuid) -> AppResult<Account> {
        let account = self
            .uow
            .accounts()
            .find_by_id(account_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow.sessions().set_current(Some(account.id)).await?;
        tracing::info!(account_id = %account.id, role = %account.role, "Signed in");
        Ok(account)
    }

    async fn sign_out(&self) -> AppResult<()> {
        self.uow.sessions().set_current(None).await?;
        tracing::info!("Signed out");
        Ok(())
    }

    async fn require_current(&self) -> AppResult<Account> {
        self.current().await?.ok_or(AppError::Unauthorized)
    }

    async fn require_role(&self, role: AccountRole) -> AppResult<Account> {
        let account = self.require_current().await?;
        if account.role != role {
            tracing::debug!(
                account_id = %account.id,
                required = %role,
                actual = %account.role,
                "Role check failed"
            );
            return Err(AppError::Forbidden);
        }
        Ok(account)
    }
}
