//! Demo directory seed.

use domain::{Account, AccountRole, NewAccount};

use common::AppResult;

use crate::service::ServiceContainer;

/// Accounts created by [`bootstrap`]
#[derive(Debug, Clone)]
pub struct SeededTree {
    pub hq: Account,
    pub admin: Account,
    pub merchant: Account,
}

/// Create HQ -> ADMIN -> MERCHANT when the directory is empty.
///
/// Returns `None` and leaves storage untouched if any account exists.
pub async fn bootstrap(services: &dyn ServiceContainer) -> AppResult<Option<SeededTree>> {
    let accounts = services.accounts();
    if !accounts.list().await?.is_empty() {
        tracing::info!("Directory already populated, skipping seed");
        return Ok(None);
    }

    let hq = accounts
        .create_account(NewAccount::new(
            AccountRole::Hq,
            None,
            "Headquarters",
            "hq@example.com",
        ))
        .await?;
    let admin = accounts
        .create_account(NewAccount::new(
            AccountRole::Admin,
            Some(hq.id),
            "Seoul Regional Office",
            "seoul@example.com",
        ))
        .await?;
    let merchant = accounts
        .create_account(NewAccount::new(
            AccountRole::Merchant,
            Some(admin.id),
            "Gangnam Store",
            "gangnam@example.com",
        ))
        .await?;

    tracing::info!(
        hq_id = %hq.id,
        admin_id = %admin.id,
        merchant_id = %merchant.id,
        "Seeded demo directory"
    );

    Ok(Some(SeededTree { hq, admin, merchant }))
}
