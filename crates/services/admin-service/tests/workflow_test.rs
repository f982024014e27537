//! Delete request workflow integration tests.

mod support;

use std::sync::Arc;

use admin_service_lib::infra::{Database, MemoryStore};
use admin_service_lib::notification::{NotificationKind, RecordingNotifier};
use admin_service_lib::service::{ServiceContainer, Services};
use common::AppError;
use domain::{AccountRole, AccountStatus, DeleteRequestStatus, NewAccount};
use tokio_test::assert_ok;
use uuid::Uuid;

use support::{deps, harness, harness_with_notifier, HQ_CHANNEL};

#[tokio::test]
async fn test_file_request_creates_one_request_and_one_hq_notice() {
    let h = harness().await;
    let (admin, merchant) = (&h.tree.admin, &h.tree.merchant);

    let request = h
        .services
        .delete_requests()
        .file_request(admin.id, merchant.id, Some("fraud".to_string()))
        .await
        .unwrap();

    assert_eq!(request.status, DeleteRequestStatus::Requested);
    assert_eq!(request.target_admin_id, merchant.id);
    assert_eq!(request.requested_by_id, admin.id);
    assert_eq!(request.reason.as_deref(), Some("fraud"));
    assert!(request.processed_at.is_none());

    let all = h.services.delete_requests().list_by_status(None).await.unwrap();
    assert_eq!(all, vec![request.clone()]);

    let sent = h.notifier.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, HQ_CHANNEL);
    assert_eq!(sent[0].kind, NotificationKind::DeleteRequested);
    assert_eq!(sent[0].metadata["target_id"], merchant.id.to_string());
    assert_eq!(sent[0].metadata["target_name"], merchant.name);
    assert_eq!(sent[0].metadata["requester_id"], admin.id.to_string());
    assert_eq!(sent[0].metadata["reason"], "fraud");
}

#[tokio::test]
async fn test_approve_marks_target_and_notifies_requester() {
    let h = harness().await;
    let workflow = h.services.delete_requests();
    let filed = workflow
        .file_request(h.tree.admin.id, h.tree.merchant.id, None)
        .await
        .unwrap();

    let approved = workflow.approve(h.tree.hq.id, filed.id, None).await.unwrap();

    assert_eq!(approved.status, DeleteRequestStatus::Approved);
    assert!(approved.processed_at.is_some());
    let merchant = h.services.accounts().get(h.tree.merchant.id).await.unwrap();
    assert_eq!(merchant.status, AccountStatus::PendingDelete);

    let to_requester = h.notifier.sent_to(&h.tree.admin.email).await;
    assert_eq!(to_requester.len(), 1);
    assert_eq!(to_requester[0].kind, NotificationKind::DeleteApproved);
    assert_eq!(h.notifier.sent().await.len(), 2);
}

#[tokio::test]
async fn test_reject_leaves_target_status_alone() {
    let h = harness().await;
    let (hq, admin, merchant) = (&h.tree.hq, &h.tree.admin, &h.tree.merchant);
    h.services
        .accounts()
        .set_status(hq.id, merchant.id, AccountStatus::Stopped)
        .await
        .unwrap();

    let workflow = h.services.delete_requests();
    let filed = workflow.file_request(admin.id, merchant.id, None).await.unwrap();
    let rejected = workflow
        .reject(hq.id, filed.id, Some("keep the store".to_string()))
        .await
        .unwrap();

    assert_eq!(rejected.status, DeleteRequestStatus::Rejected);
    assert!(rejected.processed_at.is_some());
    assert_eq!(rejected.log.as_deref(), Some("keep the store"));
    let after = h.services.accounts().get(merchant.id).await.unwrap();
    assert_eq!(after.status, AccountStatus::Stopped);

    let to_requester = h.notifier.sent_to(&admin.email).await;
    assert_eq!(to_requester.len(), 1);
    assert_eq!(to_requester[0].kind, NotificationKind::DeleteRejected);
}

#[tokio::test]
async fn test_resolving_twice_changes_nothing() {
    let h = harness().await;
    let (hq, admin, merchant) = (&h.tree.hq, &h.tree.admin, &h.tree.merchant);
    let workflow = h.services.delete_requests();

    let filed = workflow.file_request(admin.id, merchant.id, None).await.unwrap();
    let rejected = workflow.reject(hq.id, filed.id, None).await.unwrap();
    let before = h.services.accounts().get(merchant.id).await.unwrap();
    let sent_before = h.notifier.sent().await.len();

    let second = workflow.approve(hq.id, filed.id, None).await;
    assert!(matches!(second, Err(AppError::InvariantViolation(_))));

    let third = workflow.reject(hq.id, filed.id, None).await;
    assert!(matches!(third, Err(AppError::InvariantViolation(_))));

    assert_eq!(workflow.get(filed.id).await.unwrap(), rejected);
    assert_eq!(h.services.accounts().get(merchant.id).await.unwrap(), before);
    assert_eq!(h.notifier.sent().await.len(), sent_before);
}

#[tokio::test]
async fn test_end_to_end_approval_scenario() {
    let h = harness().await;
    let (hq, admin, merchant) = (&h.tree.hq, &h.tree.admin, &h.tree.merchant);
    assert_eq!(merchant.parent_id, Some(admin.id));
    assert_eq!(admin.parent_id, Some(hq.id));
    assert_eq!(merchant.status, AccountStatus::Active);

    let workflow = h.services.delete_requests();
    let filed = workflow
        .file_request(admin.id, merchant.id, Some("inactive 90 days".to_string()))
        .await
        .unwrap();
    let approved = workflow
        .approve(hq.id, filed.id, Some("본사에서 삭제 승인".to_string()))
        .await
        .unwrap();

    assert_eq!(approved.status, DeleteRequestStatus::Approved);
    assert_eq!(approved.log.as_deref(), Some("본사에서 삭제 승인"));
    assert_eq!(
        h.services.accounts().get(merchant.id).await.unwrap().status,
        AccountStatus::PendingDelete
    );

    let resolution = h.notifier.sent_to(&admin.email).await;
    assert_eq!(resolution.len(), 1);
    assert_eq!(resolution[0].metadata["log"], "본사에서 삭제 승인");
    assert_eq!(resolution[0].metadata["reason"], "inactive 90 days");
    assert_eq!(resolution[0].metadata["decision"], "approved");
}

#[tokio::test]
async fn test_failed_notification_never_rolls_back() {
    let h = harness_with_notifier(
        admin_service_lib::notification::RecordingNotifier::failing("relay down"),
    )
    .await;
    let workflow = h.services.delete_requests();

    let filed = assert_ok!(
        workflow
            .file_request(h.tree.admin.id, h.tree.merchant.id, None)
            .await
    );
    let approved = assert_ok!(workflow.approve(h.tree.hq.id, filed.id, None).await);

    assert_eq!(approved.status, DeleteRequestStatus::Approved);
    let snapshot = h.db.export().await;
    assert_eq!(snapshot.delete_requests.len(), 1);
    assert_eq!(snapshot.delete_requests[0].status, DeleteRequestStatus::Approved);
    assert_eq!(
        snapshot.account(h.tree.merchant.id).unwrap().status,
        AccountStatus::PendingDelete
    );
    assert_eq!(h.notifier.sent().await.len(), 2);
}

#[tokio::test]
async fn test_duplicate_pending_requests_coexist() {
    let h = harness().await;
    let workflow = h.services.delete_requests();

    let first = workflow
        .file_request(h.tree.admin.id, h.tree.merchant.id, None)
        .await
        .unwrap();
    let second = workflow
        .file_request(h.tree.admin.id, h.tree.merchant.id, Some("again".to_string()))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    let pending = workflow
        .list_by_status(Some(DeleteRequestStatus::Requested))
        .await
        .unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(workflow.list_by_target(h.tree.merchant.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_by_status_filters_in_insertion_order() {
    let h = harness().await;
    let (hq, admin, merchant) = (&h.tree.hq, &h.tree.admin, &h.tree.merchant);
    let workflow = h.services.delete_requests();

    let a = workflow.file_request(admin.id, merchant.id, None).await.unwrap();
    let b = workflow.file_request(admin.id, merchant.id, None).await.unwrap();
    let c = workflow.file_request(admin.id, merchant.id, None).await.unwrap();
    workflow.reject(hq.id, b.id, None).await.unwrap();

    let ids = |list: Vec<domain::DeleteRequest>| list.into_iter().map(|r| r.id).collect::<Vec<Uuid>>();
    assert_eq!(ids(workflow.list_by_status(None).await.unwrap()), vec![a.id, b.id, c.id]);
    assert_eq!(
        ids(workflow
            .list_by_status(Some(DeleteRequestStatus::Requested))
            .await
            .unwrap()),
        vec![a.id, c.id]
    );
    assert_eq!(
        ids(workflow
            .list_by_status(Some(DeleteRequestStatus::Rejected))
            .await
            .unwrap()),
        vec![b.id]
    );
    assert!(workflow
        .list_by_status(Some(DeleteRequestStatus::Approved))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_file_request_input_rules() {
    let h = harness().await;
    let workflow = h.services.delete_requests();

    let missing = workflow
        .file_request(h.tree.admin.id, Uuid::from_u128(9_999), None)
        .await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    let too_long = workflow
        .file_request(h.tree.admin.id, h.tree.merchant.id, Some("x".repeat(1001)))
        .await;
    assert!(matches!(too_long, Err(AppError::Validation(_))));

    let blank = workflow
        .file_request(h.tree.admin.id, h.tree.merchant.id, Some("   ".to_string()))
        .await
        .unwrap();
    assert_eq!(blank.reason, None);

    assert_eq!(h.notifier.sent().await.len(), 1);
}

#[tokio::test]
async fn test_grandchild_is_in_scope() {
    let h = harness().await;
    let kiosk = h
        .services
        .accounts()
        .create_account(NewAccount::new(
            AccountRole::Merchant,
            Some(h.tree.merchant.id),
            "Gangnam Kiosk",
            "kiosk@example.com",
        ))
        .await
        .unwrap();

    let filed = h
        .services
        .delete_requests()
        .file_request(h.tree.admin.id, kiosk.id, None)
        .await;
    assert!(filed.is_ok());
}

#[tokio::test]
async fn test_resolving_request_for_vanished_target_is_not_found() {
    let h = harness().await;
    let (hq, merchant) = (&h.tree.hq, &h.tree.merchant);
    let filed = h
        .services
        .delete_requests()
        .file_request(h.tree.admin.id, merchant.id, None)
        .await
        .unwrap();

    // Reopen a directory whose stored snapshot lost the target account.
    let mut snapshot = h.db.export().await;
    snapshot.accounts.retain(|a| a.id != merchant.id);
    let store = Arc::new(MemoryStore::with_snapshot(&snapshot).unwrap());
    let db = Arc::new(Database::open(store.clone()).await.unwrap());
    let notifier = Arc::new(RecordingNotifier::new());
    let services = Services::assemble(db, deps(notifier.clone()));
    let workflow = services.delete_requests();

    let approved = workflow.approve(hq.id, filed.id, None).await;
    assert!(matches!(approved, Err(AppError::NotFound)));
    let rejected = workflow.reject(hq.id, filed.id, None).await;
    assert!(matches!(rejected, Err(AppError::NotFound)));

    let after = workflow.get(filed.id).await.unwrap();
    assert_eq!(after.status, DeleteRequestStatus::Requested);
    assert!(after.processed_at.is_none());
    assert!(notifier.sent().await.is_empty());
    assert_eq!(store.save_count(), 0);
}
