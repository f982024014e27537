//! Account directory - the account tree and its lifecycle flags.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{Account, AccountStatus, NewAccount, UpdateProfile};

use super::{ensure_hq, load_actor};
use crate::infra::{Clock, IdGenerator, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account directory trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Get account by ID
    async fn get(&self, id: Uuid) -> AppResult<Account>;

    /// List all accounts in storage order
    async fn list(&self) -> AppResult<Vec<Account>>;

    /// Direct children of `parent_id`; never transitive descendants
    async fn get_children(&self, parent_id: Uuid) -> AppResult<Vec<Account>>;

    /// Every account below `id`, breadth first
    async fn get_descendants(&self, id: Uuid) -> AppResult<Vec<Account>>;

    /// Ancestor chain of `id`, nearest parent first
    async fn ancestors(&self, id: Uuid) -> AppResult<Vec<Account>>;

    /// Bootstrap path for new accounts (seed data, operator CLI)
    async fn create_account(&self, data: NewAccount) -> AppResult<Account>;

    /// Move `id` under `new_parent` (HQ only)
    async fn reparent(&self, actor_id: Uuid, id: Uuid, new_parent: Uuid) -> AppResult<Account>;

    /// Overwrite the lifecycle status (HQ only)
    async fn set_status(&self, actor_id: Uuid, id: Uuid, status: AccountStatus) -> AppResult<Account>;

    /// Merge descriptive fields; structure is untouched
    async fn update_profile(&self, id: Uuid, update: UpdateProfile) -> AppResult<Account>;
}

/// Concrete implementation of AccountService using Unit of Work.
pub struct AccountDirectory<U: UnitOfWork> {
    uow: Arc<U>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<U: UnitOfWork> AccountDirectory<U> {
    pub fn new(uow: Arc<U>, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { uow, ids, clock }
    }
}

#[async_trait]
impl<U: UnitOfWork> AccountService for AccountDirectory<U> {
    async fn get(&self, id: Uuid) -> AppResult<Account> {
        self.uow
            .accounts()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        self.uow.accounts().list().await
    }

    async fn get_children(&self, parent_id: Uuid) -> AppResult<Vec<Account>> {
        self.uow.accounts().list_children(parent_id).await
    }

    async fn get_descendants(&self, id: Uuid) -> AppResult<Vec<Account>> {
        self.uow.accounts().list_descendants(id).await
    }

    async fn ancestors(&self, id: Uuid) -> AppResult<Vec<Account>> {
        let chain = self.uow.accounts().ancestor_ids(id).await?;
        let accounts = self.uow.accounts().list().await?;

        chain
            .into_iter()
            .map(|ancestor| {
                accounts
                    .iter()
                    .find(|a| a.id == ancestor)
                    .cloned()
                    .ok_or(AppError::NotFound)
            })
            .collect()
    }

    async fn create_account(&self, data: NewAccount) -> AppResult<Account> {
        data.validate()?;

        let account = Account::new(self.ids.next_id(), data, self.clock.now());
        let account = self.uow.accounts().create(account).await?;

        tracing::info!(
            account_id = %account.id,
            role = %account.role,
            parent_id = ?account.parent_id,
            "Account created"
        );
        Ok(account)
    }

    async fn reparent(&self, actor_id: Uuid, id: Uuid, new_parent: Uuid) -> AppResult<Account> {
        let actor = load_actor(self.uow.as_ref(), actor_id).await?;
        ensure_hq(&actor)?;

        let account = self
            .uow
            .accounts()
            .set_parent(id, new_parent, self.clock.now())
            .await?;

        tracing::info!(
            account_id = %id,
            parent_id = %new_parent,
            actor_id = %actor.id,
            "Account moved"
        );
        Ok(account)
    }

    async fn set_status(&self, actor_id: Uuid, id: Uuid, status: AccountStatus) -> AppResult<Account> {
        let actor = load_actor(self.uow.as_ref(), actor_id).await?;
        ensure_hq(&actor)?;

        let account = self
            .uow
            .accounts()
            .set_status(id, status, self.clock.now())
            .await?;

        tracing::info!(
            account_id = %id,
            status = %status,
            actor_id = %actor.id,
            "Account status changed"
        );
        Ok(account)
    }

    async fn update_profile(&self, id: Uuid, update: UpdateProfile) -> AppResult<Account> {
        update.validate()?;
        self.uow
            .accounts()
            .update_profile(id, update, self.clock.now())
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use domain::AccountRole;
    use mockall::predicate::eq;

    use super::*;
    use crate::infra::{SequentialIdGenerator, SteppingClock};
    use crate::service::testing::{FrozenUnitOfWork, TestUnitOfWork};

    fn account(n: u128, role: AccountRole, parent: Option<u128>) -> Account {
        Account::new(
            Uuid::from_u128(n),
            NewAccount::new(role, parent.map(Uuid::from_u128), format!("acct-{}", n), "a@example.com"),
            Utc::now(),
        )
    }

    fn directory(uow: TestUnitOfWork) -> AccountDirectory<FrozenUnitOfWork> {
        AccountDirectory::new(
            uow.freeze(),
            Arc::new(SequentialIdGenerator::starting_at(100)),
            Arc::new(SteppingClock::per_second()),
        )
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mut uow = TestUnitOfWork::default();
        uow.accounts.expect_find_by_id().returning(|_| Ok(None));

        let result = directory(uow).get(Uuid::from_u128(9)).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_set_status_requires_hq() {
        let mut uow = TestUnitOfWork::default();
        uow.accounts
            .expect_find_by_id()
            .with(eq(Uuid::from_u128(2)))
            .returning(|_| Ok(Some(account(2, AccountRole::Admin, Some(1)))));
        uow.accounts.expect_set_status().never();

        let result = directory(uow)
            .set_status(Uuid::from_u128(2), Uuid::from_u128(3), AccountStatus::Stopped)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_unknown_actor_is_unauthorized() {
        let mut uow = TestUnitOfWork::default();
        uow.accounts.expect_find_by_id().returning(|_| Ok(None));
        uow.accounts.expect_set_parent().never();

        let result = directory(uow)
            .reparent(Uuid::from_u128(42), Uuid::from_u128(3), Uuid::from_u128(1))
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_set_status_by_hq() {
        let mut uow = TestUnitOfWork::default();
        uow.accounts
            .expect_find_by_id()
            .returning(|_| Ok(Some(account(1, AccountRole::Hq, None))));
        uow.accounts
            .expect_set_status()
            .withf(|id, status, _| *id == Uuid::from_u128(2) && *status == AccountStatus::Stopped)
            .times(1)
            .returning(|id, status, now| {
                let mut a = account(id.as_u128(), AccountRole::Admin, Some(1));
                a.set_status(status, now);
                Ok(a)
            });

        let updated = directory(uow)
            .set_status(Uuid::from_u128(1), Uuid::from_u128(2), AccountStatus::Stopped)
            .await
            .unwrap();
        assert_eq!(updated.status, AccountStatus::Stopped);
    }

    #[tokio::test]
    async fn test_create_account_rejects_invalid_email() {
        let mut uow = TestUnitOfWork::default();
        uow.accounts.expect_create().never();

        let result = directory(uow)
            .create_account(NewAccount::new(AccountRole::Merchant, None, "Shop", "nope"))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_account_assigns_generated_id() {
        let mut uow = TestUnitOfWork::default();
        uow.accounts.expect_create().times(1).returning(|a| Ok(a));

        let created = directory(uow)
            .create_account(NewAccount::new(AccountRole::Hq, None, "HQ", "hq@example.com"))
            .await
            .unwrap();
        assert_eq!(created.id, Uuid::from_u128(100));
        assert_eq!(created.status, AccountStatus::Active);
    }

    #[tokio::test]
    async fn test_ancestors_resolves_chain() {
        let mut uow = TestUnitOfWork::default();
        uow.accounts
            .expect_ancestor_ids()
            .returning(|_| Ok(vec![Uuid::from_u128(2), Uuid::from_u128(1)]));
        uow.accounts.expect_list().returning(|| {
            Ok(vec![
                account(1, AccountRole::Hq, None),
                account(2, AccountRole::Admin, Some(1)),
                account(3, AccountRole::Merchant, Some(2)),
            ])
        });

        let chain = directory(uow).ancestors(Uuid::from_u128(3)).await.unwrap();
        let names: Vec<&str> = chain.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["acct-2", "acct-1"]);
    }
}
