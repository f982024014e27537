//! Ownership index - Connections and News scoped to one owning account.
//!
//! Removal is immediate. Resources do not go through the HQ approval
//! workflow that guards account deletion.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{NewResource, OwnedResource, ResourceKind, UpdateResource};

use super::load_actor;
use crate::infra::{Clock, IdGenerator, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Ownership index trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OwnershipService: Send + Sync {
    /// Get resource by ID
    async fn get(&self, id: Uuid) -> AppResult<OwnedResource>;

    /// Resources of `kind` whose owner is exactly `owner_id`
    async fn list_by_owner(&self, kind: ResourceKind, owner_id: Uuid) -> AppResult<Vec<OwnedResource>>;

    /// Store a new resource under the acting account
    async fn create(&self, actor_id: Uuid, data: NewResource) -> AppResult<OwnedResource>;

    /// Merge fields of a resource the actor owns
    async fn update(&self, actor_id: Uuid, id: Uuid, update: UpdateResource) -> AppResult<OwnedResource>;

    /// Delete a resource the actor owns
    async fn remove(&self, actor_id: Uuid, id: Uuid) -> AppResult<OwnedResource>;
}

/// Concrete implementation of OwnershipService using Unit of Work.
pub struct OwnershipIndex<U: UnitOfWork> {
    uow: Arc<U>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<U: UnitOfWork> OwnershipIndex<U> {
    pub fn new(uow: Arc<U>, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { uow, ids, clock }
    }
}

#[async_trait]
impl<U: UnitOfWork> OwnershipService for OwnershipIndex<U> {
    async fn get(&self, id: Uuid) -> AppResult<OwnedResource> {
        self.uow
            .resources()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_by_owner(&self, kind: ResourceKind, owner_id: Uuid) -> AppResult<Vec<OwnedResource>> {
        self.uow.resources().list_by_owner(kind, owner_id).await
    }

    async fn create(&self, actor_id: Uuid, data: NewResource) -> AppResult<OwnedResource> {
        let actor = load_actor(self.uow.as_ref(), actor_id).await?;
        if data.owner_id != actor.id {
            return Err(AppError::Forbidden);
        }
        data.validate()?;

        let resource = OwnedResource::new(self.ids.next_id(), data, self.clock.now());
        let resource = self.uow.resources().create(resource).await?;

        tracing::info!(
            resource_id = %resource.id,
            kind = %resource.kind,
            owner_id = %resource.owner_id,
            "Resource created"
        );
        Ok(resource)
    }

    async fn update(&self, actor_id: Uuid, id: Uuid, update: UpdateResource) -> AppResult<OwnedResource> {
        let actor = load_actor(self.uow.as_ref(), actor_id).await?;
        update.validate()?;

        self.uow
            .resources()
            .update(id, actor.id, update, self.clock.now())
            .await
    }

    async fn remove(&self, actor_id: Uuid, id: Uuid) -> AppResult<OwnedResource> {
        let actor = load_actor(self.uow.as_ref(), actor_id).await?;
        let removed = self.uow.resources().remove(id, actor.id).await?;

        tracing::info!(
            resource_id = %removed.id,
            kind = %removed.kind,
            owner_id = %removed.owner_id,
            "Resource deleted"
        );
        Ok(removed)
    }
}
