//! Account handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{Account, AccountStatus, UpdateProfile};

use crate::extractors::ValidatedJson;
use crate::middleware::{hq_middleware, CurrentAccount};
use crate::state::AppState;

/// Status change request body
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: AccountStatus,
}

/// Re-parent request body
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveAccountRequest {
    pub parent_id: Uuid,
}

/// Create account routes
pub fn account_routes(state: AppState) -> Router<AppState> {
    let hq_only = Router::new()
        .route("/:id/status", put(update_status))
        .route("/:id/parent", put(move_account))
        .route_layer(axum::middleware::from_fn_with_state(state, hq_middleware));

    Router::new()
        .route("/", get(list_accounts))
        .route("/:id", get(get_account))
        .route("/:id/children", get(list_children))
        .route("/:id/profile", put(update_profile))
        .merge(hq_only)
}

/// List all accounts
pub async fn list_accounts(State(state): State<AppState>) -> AppResult<Json<Vec<Account>>> {
    Ok(Json(state.services.accounts().list().await?))
}

/// Get account by ID
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Account>> {
    Ok(Json(state.services.accounts().get(id).await?))
}

/// Direct children of an account
pub async fn list_children(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Account>>> {
    Ok(Json(state.services.accounts().get_children(id).await?))
}

/// Update descriptive fields (own profile or HQ)
pub async fn update_profile(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateProfile>,
) -> AppResult<Json<Account>> {
    if current.id != id && !current.is_hq() {
        return Err(AppError::Forbidden);
    }
    Ok(Json(state.services.accounts().update_profile(id, body).await?))
}

/// Stop, resume or mark an account (HQ only)
pub async fn update_status(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateStatusRequest>,
) -> AppResult<Json<Account>> {
    let account = state
        .services
        .accounts()
        .set_status(current.id, id, body.status)
        .await?;
    Ok(Json(account))
}

/// Move an account under a new parent (HQ only)
pub async fn move_account(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<MoveAccountRequest>,
) -> AppResult<Json<Account>> {
    let account = state
        .services
        .accounts()
        .reparent(current.id, id, body.parent_id)
        .await?;
    Ok(Json(account))
}
