//! Connection and News handlers.
//!
//! Every mutation is scoped to the acting account; deleting is immediate.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{NewResource, OwnedResource, ResourceContent, ResourceKind, UpdateResource};

use crate::extractors::ValidatedJson;
use crate::middleware::CurrentAccount;
use crate::state::AppState;

/// Listing filter; defaults to the acting account
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub owner: Option<Uuid>,
}

/// Create resource routes
pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/:kind", get(list_resources).post(create_resource))
        .route("/:kind/:id", put(update_resource).delete(delete_resource))
}

/// Resources of one kind owned by exactly one account
pub async fn list_resources(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    Path(kind): Path<ResourceKind>,
    Query(query): Query<OwnerQuery>,
) -> AppResult<Json<Vec<OwnedResource>>> {
    let owner = query.owner.unwrap_or(current.id);
    Ok(Json(state.services.resources().list_by_owner(kind, owner).await?))
}

/// Create a resource owned by the acting account
pub async fn create_resource(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    Path(kind): Path<ResourceKind>,
    ValidatedJson(content): ValidatedJson<ResourceContent>,
) -> AppResult<(StatusCode, Json<OwnedResource>)> {
    let data = NewResource {
        kind,
        owner_id: current.id,
        content,
    };
    let created = state.services.resources().create(current.id, data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a resource the acting account owns
pub async fn update_resource(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    Path((kind, id)): Path<(ResourceKind, Uuid)>,
    ValidatedJson(body): ValidatedJson<UpdateResource>,
) -> AppResult<Json<OwnedResource>> {
    ensure_kind(&state, kind, id).await?;
    Ok(Json(state.services.resources().update(current.id, id, body).await?))
}

/// Delete a resource the acting account owns
pub async fn delete_resource(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    Path((kind, id)): Path<(ResourceKind, Uuid)>,
) -> AppResult<StatusCode> {
    ensure_kind(&state, kind, id).await?;
    state.services.resources().remove(current.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A news id addressed under /connection (or the reverse) does not exist there.
async fn ensure_kind(state: &AppState, kind: ResourceKind, id: Uuid) -> AppResult<()> {
    let resource = state.services.resources().get(id).await?;
    if resource.kind != kind {
        return Err(AppError::NotFound);
    }
    Ok(())
}
