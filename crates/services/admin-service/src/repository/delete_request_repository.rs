//! Delete request repository.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{DeleteRequest, DeleteRequestStatus};

use crate::infra::Database;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Delete request repository trait for dependency injection.
///
/// Resolution is not exposed here; it spans the request and its target
/// account and runs as a unit-of-work transaction.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DeleteRequestRepository: Send + Sync {
    /// Find request by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DeleteRequest>>;

    /// Requests in insertion order, optionally filtered by status
    async fn list(&self, status: Option<DeleteRequestStatus>) -> AppResult<Vec<DeleteRequest>>;

    /// Requests filed against one account
    async fn list_by_target(&self, target_id: Uuid) -> AppResult<Vec<DeleteRequest>>;

    /// Insert a new request
    async fn create(&self, request: DeleteRequest) -> AppResult<DeleteRequest>;
}

/// Snapshot-backed implementation of DeleteRequestRepository
pub struct DeleteRequestStore {
    db: Arc<Database>,
}

impl DeleteRequestStore {
    /// Create new repository instance
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DeleteRequestRepository for DeleteRequestStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DeleteRequest>> {
        Ok(self.db.read(|s| s.delete_request(id).cloned()).await)
    }

    async fn list(&self, status: Option<DeleteRequestStatus>) -> AppResult<Vec<DeleteRequest>> {
        Ok(self
            .db
            .read(|s| {
                s.delete_requests
                    .iter()
                    .filter(|r| status.map_or(true, |wanted| r.status == wanted))
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_by_target(&self, target_id: Uuid) -> AppResult<Vec<DeleteRequest>> {
        Ok(self
            .db
            .read(|s| {
                s.delete_requests
                    .iter()
                    .filter(|r| r.target_admin_id == target_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn create(&self, request: DeleteRequest) -> AppResult<DeleteRequest> {
        self.db
            .write(move |s| {
                if s.delete_request(request.id).is_some() {
                    return Err(AppError::conflict("Delete request"));
                }
                s.delete_requests.push(request.clone());
                Ok(request)
            })
            .await
    }
}
