//! Account directory integration tests.

mod support;

use std::collections::HashSet;

use admin_service_lib::service::ServiceContainer;
use common::AppError;
use domain::{AccountRole, AccountStatus, NewAccount, UpdateProfile};
use uuid::Uuid;

use support::harness;

#[tokio::test]
async fn test_children_are_exactly_direct_children() {
    let h = harness().await;
    let directory = h.services.accounts();
    let second_admin = directory
        .create_account(NewAccount::new(
            AccountRole::Admin,
            Some(h.tree.hq.id),
            "Busan Regional Office",
            "busan@example.com",
        ))
        .await
        .unwrap();

    for account in directory.list().await.unwrap() {
        let expected: HashSet<Uuid> = directory
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter(|c| c.parent_id == Some(account.id))
            .map(|c| c.id)
            .collect();
        let actual: HashSet<Uuid> = directory
            .get_children(account.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(actual, expected, "children of {}", account.name);
    }

    let hq_children: HashSet<Uuid> = directory
        .get_children(h.tree.hq.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(hq_children, HashSet::from([h.tree.admin.id, second_admin.id]));
    assert!(!hq_children.contains(&h.tree.merchant.id));
}

#[tokio::test]
async fn test_children_of_unknown_id_is_empty() {
    let h = harness().await;
    let children = h
        .services
        .accounts()
        .get_children(Uuid::from_u128(12_345))
        .await
        .unwrap();
    assert!(children.is_empty());
}

#[tokio::test]
async fn test_descendants_and_ancestors() {
    let h = harness().await;
    let directory = h.services.accounts();

    let below_hq: Vec<Uuid> = directory
        .get_descendants(h.tree.hq.id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(below_hq, vec![h.tree.admin.id, h.tree.merchant.id]);

    let above_merchant: Vec<Uuid> = directory
        .ancestors(h.tree.merchant.id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(above_merchant, vec![h.tree.admin.id, h.tree.hq.id]);
}

#[tokio::test]
async fn test_stop_then_resume_updates_timestamp_twice() {
    let h = harness().await;
    let directory = h.services.accounts();
    let original = h.tree.admin.clone();

    let stopped = directory
        .set_status(h.tree.hq.id, original.id, AccountStatus::Stopped)
        .await
        .unwrap();
    let resumed = directory
        .set_status(h.tree.hq.id, original.id, AccountStatus::Active)
        .await
        .unwrap();

    assert_eq!(stopped.status, AccountStatus::Stopped);
    assert_eq!(resumed.status, AccountStatus::Active);
    assert!(stopped.updated_at > original.updated_at);
    assert!(resumed.updated_at > stopped.updated_at);
    assert_eq!(directory.get(original.id).await.unwrap(), resumed);
}

#[tokio::test]
async fn test_set_status_rules() {
    let h = harness().await;
    let directory = h.services.accounts();

    let unknown = directory
        .set_status(h.tree.hq.id, Uuid::from_u128(777), AccountStatus::Stopped)
        .await;
    assert!(matches!(unknown, Err(AppError::NotFound)));

    let by_admin = directory
        .set_status(h.tree.admin.id, h.tree.merchant.id, AccountStatus::Stopped)
        .await;
    assert!(matches!(by_admin, Err(AppError::Forbidden)));
    assert_eq!(
        directory.get(h.tree.merchant.id).await.unwrap().status,
        AccountStatus::Active
    );
}

#[tokio::test]
async fn test_reparent_rejects_cycles() {
    let h = harness().await;
    let directory = h.services.accounts();

    let under_own_child = directory
        .reparent(h.tree.hq.id, h.tree.admin.id, h.tree.merchant.id)
        .await;
    assert!(matches!(under_own_child, Err(AppError::InvariantViolation(_))));

    let under_itself = directory
        .reparent(h.tree.hq.id, h.tree.admin.id, h.tree.admin.id)
        .await;
    assert!(matches!(under_itself, Err(AppError::InvariantViolation(_))));

    assert_eq!(
        directory.get(h.tree.admin.id).await.unwrap().parent_id,
        Some(h.tree.hq.id)
    );
}

#[tokio::test]
async fn test_reparent_moves_subtree() {
    let h = harness().await;
    let directory = h.services.accounts();
    let busan = directory
        .create_account(NewAccount::new(
            AccountRole::Admin,
            Some(h.tree.hq.id),
            "Busan Regional Office",
            "busan@example.com",
        ))
        .await
        .unwrap();

    let moved = directory
        .reparent(h.tree.hq.id, h.tree.merchant.id, busan.id)
        .await
        .unwrap();

    assert_eq!(moved.parent_id, Some(busan.id));
    assert!(directory.get_children(h.tree.admin.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_account_requires_existing_parent() {
    let h = harness().await;
    let orphan = h
        .services
        .accounts()
        .create_account(NewAccount::new(
            AccountRole::Merchant,
            Some(Uuid::from_u128(404)),
            "Lost Store",
            "lost@example.com",
        ))
        .await;
    assert!(matches!(orphan, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_update_profile_keeps_structure() {
    let h = harness().await;
    let directory = h.services.accounts();

    let updated = directory
        .update_profile(
            h.tree.merchant.id,
            UpdateProfile {
                name: Some("Gangnam Flagship".to_string()),
                phone: Some("02-555-0100".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Gangnam Flagship");
    assert_eq!(updated.phone.as_deref(), Some("02-555-0100"));
    assert_eq!(updated.id, h.tree.merchant.id);
    assert_eq!(updated.role, AccountRole::Merchant);
    assert_eq!(updated.parent_id, Some(h.tree.admin.id));
    assert_eq!(updated.status, AccountStatus::Active);

    let missing = directory
        .update_profile(Uuid::from_u128(404), UpdateProfile::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound)));
}
