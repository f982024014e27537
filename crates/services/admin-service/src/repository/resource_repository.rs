//! Owner-scoped resource repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{OwnedResource, ResourceKind, UpdateResource};

use crate::infra::Database;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Resource repository trait for dependency injection.
///
/// Queries never aggregate across the account tree: a resource belongs to
/// exactly the account recorded as its owner.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Find resource by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<OwnedResource>>;

    /// Resources of one kind owned by exactly `owner_id`
    async fn list_by_owner(&self, kind: ResourceKind, owner_id: Uuid) -> AppResult<Vec<OwnedResource>>;

    /// Insert a fully built resource
    async fn create(&self, resource: OwnedResource) -> AppResult<OwnedResource>;

    /// Merge fields if `owner_id` owns the resource
    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: UpdateResource,
        now: DateTime<Utc>,
    ) -> AppResult<OwnedResource>;

    /// Delete immediately if `owner_id` owns the resource
    async fn remove(&self, id: Uuid, owner_id: Uuid) -> AppResult<OwnedResource>;
}

/// Snapshot-backed implementation of ResourceRepository
pub struct ResourceStore {
    db: Arc<Database>,
}

impl ResourceStore {
    /// Create new repository instance
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceRepository for ResourceStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<OwnedResource>> {
        Ok(self.db.read(|s| s.resource(id).cloned()).await)
    }

    async fn list_by_owner(&self, kind: ResourceKind, owner_id: Uuid) -> AppResult<Vec<OwnedResource>> {
        Ok(self
            .db
            .read(|s| {
                s.resources
                    .iter()
                    .filter(|r| r.kind == kind && r.owner_id == owner_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn create(&self, resource: OwnedResource) -> AppResult<OwnedResource> {
        self.db
            .write(move |s| {
                if s.resource(resource.id).is_some() {
                    return Err(AppError::conflict("Resource"));
                }
                s.resources.push(resource.clone());
                Ok(resource)
            })
            .await
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: UpdateResource,
        now: DateTime<Utc>,
    ) -> AppResult<OwnedResource> {
        self.db
            .write(move |s| {
                let resource = s.resource_mut(id).ok_or_not_found()?;
                if !resource.is_owned_by(owner_id) {
                    return Err(AppError::Forbidden);
                }
                resource.apply(update, now);
                Ok(resource.clone())
            })
            .await
    }

    async fn remove(&self, id: Uuid, owner_id: Uuid) -> AppResult<OwnedResource> {
        self.db
            .write(move |s| {
                let resource = s.resource(id).ok_or_not_found()?;
                if !resource.is_owned_by(owner_id) {
                    return Err(AppError::Forbidden);
                }
                s.take_resource(id).ok_or_not_found()
            })
            .await
    }
}
