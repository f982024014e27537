//! Delete request workflow.
//!
//! A non-HQ account files a request against an account below it in the
//! tree; HQ approves or rejects it exactly once. Resolution is a single
//! check-and-set over the request and its target, and the notification is
//! sent only after that write has been committed.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    AccountStatus, Decision, DeleteRequest, DeleteRequestStatus, MAX_REASON_LENGTH,
    MAX_RESOLUTION_LOG_LENGTH,
};

use super::{ensure_hq, load_actor, normalize_note};
use crate::infra::{Clock, IdGenerator, UnitOfWork};
use crate::notification::{self, DeliveryOutcome, Notification, NotificationPort};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Delete request workflow trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DeleteRequestService: Send + Sync {
    /// File a request against `target_id` on behalf of the acting account
    async fn file_request(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        reason: Option<String>,
    ) -> AppResult<DeleteRequest>;

    /// Approve a pending request; the target becomes PENDING_DELETE
    async fn approve(&self, actor_id: Uuid, request_id: Uuid, log: Option<String>) -> AppResult<DeleteRequest>;

    /// Reject a pending request; the target is left alone
    async fn reject(&self, actor_id: Uuid, request_id: Uuid, log: Option<String>) -> AppResult<DeleteRequest>;

    /// Get request by ID
    async fn get(&self, id: Uuid) -> AppResult<DeleteRequest>;

    /// Requests in insertion order, optionally filtered by status
    async fn list_by_status(&self, status: Option<DeleteRequestStatus>) -> AppResult<Vec<DeleteRequest>>;

    /// Every request ever filed against `target_id`
    async fn list_by_target(&self, target_id: Uuid) -> AppResult<Vec<DeleteRequest>>;
}

/// Concrete implementation of DeleteRequestService using Unit of Work.
pub struct DeleteRequestWorkflow<U: UnitOfWork> {
    uow: Arc<U>,
    notifier: Arc<dyn NotificationPort>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    hq_address: String,
}

impl<U: UnitOfWork> DeleteRequestWorkflow<U> {
    pub fn new(
        uow: Arc<U>,
        notifier: Arc<dyn NotificationPort>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        hq_address: impl Into<String>,
    ) -> Self {
        Self {
            uow,
            notifier,
            ids,
            clock,
            hq_address: hq_address.into(),
        }
    }

    async fn resolve(
        &self,
        actor_id: Uuid,
        request_id: Uuid,
        decision: Decision,
        log: Option<String>,
    ) -> AppResult<DeleteRequest> {
        let actor = load_actor(self.uow.as_ref(), actor_id).await?;
        ensure_hq(&actor)?;
        let log = normalize_note(log, MAX_RESOLUTION_LOG_LENGTH, "Resolution log")?;
        let now = self.clock.now();

        let (request, target, requester) = self
            .uow
            .transaction(move |s| {
                let target_id = s.delete_request(request_id).ok_or_not_found()?.target_admin_id;
                if !s.has_account(target_id) {
                    return Err(AppError::NotFound);
                }

                let request = s.delete_request_mut(request_id).ok_or_not_found()?;
                request.resolve(decision, actor_id, log, now)?;
                let request = request.clone();

                let target = s.account_mut(target_id).ok_or_not_found()?;
                if decision == Decision::Approve {
                    target.set_status(AccountStatus::PendingDelete, now);
                }
                let target = target.clone();

                let requester = s.account(request.requested_by_id).cloned();
                Ok((request, target, requester))
            })
            .await?;

        tracing::info!(
            request_id = %request.id,
            target_id = %target.id,
            status = %request.status,
            target_status = %target.status,
            actor_id = %actor.id,
            "Delete request resolved"
        );

        match requester {
            Some(requester) => {
                let message = notification::delete_resolved(&request, decision, &target, &requester);
                self.dispatch(request.id, message).await;
            }
            None => tracing::warn!(
                request_id = %request.id,
                requested_by_id = %request.requested_by_id,
                "Requester no longer exists, resolution notice not sent"
            ),
        }

        Ok(request)
    }

    /// Hand a message to the port. The transition is already committed, so
    /// a failed delivery is only logged.
    async fn dispatch(&self, request_id: Uuid, message: Notification) {
        let to = message.to.clone();
        let kind = message.kind;

        match self.notifier.notify(message).await {
            DeliveryOutcome::Delivered => {
                tracing::debug!(request_id = %request_id, to = %to, kind = ?kind, "Notification delivered");
            }
            DeliveryOutcome::Failed(reason) => {
                tracing::warn!(
                    request_id = %request_id,
                    to = %to,
                    kind = ?kind,
                    reason = %reason,
                    "Notification failed; transition stands"
                );
            }
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> DeleteRequestService for DeleteRequestWorkflow<U> {
    async fn file_request(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        reason: Option<String>,
    ) -> AppResult<DeleteRequest> {
        let actor = load_actor(self.uow.as_ref(), actor_id).await?;
        if actor.is_hq() {
            // HQ adjudicates; it never files.
            return Err(AppError::Forbidden);
        }

        let accounts = self.uow.accounts();
        let target = accounts
            .find_by_id(target_id)
            .await?
            .ok_or(AppError::NotFound)?;

        // Management scope: the target must sit strictly below the actor.
        let chain = accounts.ancestor_ids(target.id).await?;
        if !chain.contains(&actor.id) {
            return Err(AppError::Forbidden);
        }

        let reason = normalize_note(reason, MAX_REASON_LENGTH, "Reason")?;
        let request = DeleteRequest::new(
            self.ids.next_id(),
            target.id,
            actor.id,
            reason,
            self.clock.now(),
        );
        let request = self.uow.delete_requests().create(request).await?;

        tracing::info!(
            request_id = %request.id,
            target_id = %target.id,
            requested_by_id = %actor.id,
            "Delete request filed"
        );

        let message = notification::delete_requested(&self.hq_address, &request, &target, &actor);
        self.dispatch(request.id, message).await;

        Ok(request)
    }

    async fn approve(&self, actor_id: Uuid, request_id: Uuid, log: Option<String>) -> AppResult<DeleteRequest> {
        self.resolve(actor_id, request_id, Decision::Approve, log).await
    }

    async fn reject(&self, actor_id: Uuid, request_id: Uuid, log: Option<String>) -> AppResult<DeleteRequest> {
        self.resolve(actor_id, request_id, Decision::Reject, log).await
    }

    async fn get(&self, id: Uuid) -> AppResult<DeleteRequest> {
        self.uow
            .delete_requests()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_by_status(&self, status: Option<DeleteRequestStatus>) -> AppResult<Vec<DeleteRequest>> {
        self.uow.delete_requests().list(status).await
    }

    async fn list_by_target(&self, target_id: Uuid) -> AppResult<Vec<DeleteRequest>> {
        self.uow.delete_requests().list_by_target(target_id).await
    }
}
