//! Account repository over the directory snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::hierarchy;
use domain::{Account, AccountStatus, UpdateProfile};

use crate::infra::Database;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account repository trait for dependency injection.
///
/// Performs no authorization; callers gate mutations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// List all accounts in storage order
    async fn list(&self) -> AppResult<Vec<Account>>;

    /// Accounts whose parent is `parent_id` (direct children only)
    async fn list_children(&self, parent_id: Uuid) -> AppResult<Vec<Account>>;

    /// All accounts below `id`, breadth first
    async fn list_descendants(&self, id: Uuid) -> AppResult<Vec<Account>>;

    /// Ancestor ids of `id`, nearest parent first
    async fn ancestor_ids(&self, id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Insert a fully built account
    async fn create(&self, account: Account) -> AppResult<Account>;

    /// Overwrite status and `updated_at`
    async fn set_status(&self, id: Uuid, status: AccountStatus, now: DateTime<Utc>) -> AppResult<Account>;

    /// Merge descriptive fields
    async fn update_profile(&self, id: Uuid, update: UpdateProfile, now: DateTime<Utc>) -> AppResult<Account>;

    /// Move an account under a new parent, rejecting cycles
    async fn set_parent(&self, id: Uuid, parent_id: Uuid, now: DateTime<Utc>) -> AppResult<Account>;
}

/// Snapshot-backed implementation of AccountRepository
pub struct AccountStore {
    db: Arc<Database>,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.db.read(|s| s.account(id).cloned()).await)
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        Ok(self.db.read(|s| s.accounts.clone()).await)
    }

    async fn list_children(&self, parent_id: Uuid) -> AppResult<Vec<Account>> {
        Ok(self
            .db
            .read(|s| hierarchy::children_of(&s.accounts, parent_id))
            .await)
    }

    async fn list_descendants(&self, id: Uuid) -> AppResult<Vec<Account>> {
        Ok(self
            .db
            .read(|s| hierarchy::descendants_of(&s.accounts, id))
            .await)
    }

    async fn ancestor_ids(&self, id: Uuid) -> AppResult<Vec<Uuid>> {
        self.db
            .read(|s| hierarchy::ancestors(id, |i| s.parent_of(i)))
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, account: Account) -> AppResult<Account> {
        self.db
            .write(move |s| {
                if s.has_account(account.id) {
                    return Err(AppError::conflict("Account"));
                }
                if let Some(parent_id) = account.parent_id {
                    if !s.has_account(parent_id) {
                        return Err(AppError::validation(format!(
                            "Parent account {} does not exist",
                            parent_id
                        )));
                    }
                    // Refuse to hang new accounts off an already corrupt chain.
                    hierarchy::ancestors(parent_id, |i| s.parent_of(i))?;
                }

                s.accounts.push(account.clone());
                Ok(account)
            })
            .await
    }

    async fn set_status(&self, id: Uuid, status: AccountStatus, now: DateTime<Utc>) -> AppResult<Account> {
        self.db
            .write(move |s| {
                let account = s.account_mut(id).ok_or_not_found()?;
                account.set_status(status, now);
                Ok(account.clone())
            })
            .await
    }

    async fn update_profile(&self, id: Uuid, update: UpdateProfile, now: DateTime<Utc>) -> AppResult<Account> {
        self.db
            .write(move |s| {
                let account = s.account_mut(id).ok_or_not_found()?;
                account.apply_profile(update, now);
                Ok(account.clone())
            })
            .await
    }

    async fn set_parent(&self, id: Uuid, parent_id: Uuid, now: DateTime<Utc>) -> AppResult<Account> {
        self.db
            .write(move |s| {
                if !s.has_account(id) || !s.has_account(parent_id) {
                    return Err(AppError::NotFound);
                }
                if hierarchy::would_create_cycle(id, parent_id, |i| s.parent_of(i))? {
                    return Err(AppError::invariant(format!(
                        "moving {} under {} would create a cycle",
                        id, parent_id
                    )));
                }

                let account = s.account_mut(id).ok_or_not_found()?;
                account.parent_id = Some(parent_id);
                account.updated_at = now;
                Ok(account.clone())
            })
            .await
    }
}
