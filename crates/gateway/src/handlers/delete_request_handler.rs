//! Delete request handlers.
//!
//! Filing is open to any signed-in account; the service enforces scope.
//! Approve and reject sit behind the HQ gate.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{DeleteRequest, DeleteRequestStatus};

use crate::extractors::ValidatedJson;
use crate::middleware::{hq_middleware, CurrentAccount};
use crate::state::AppState;

/// Listing filter
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<DeleteRequestStatus>,
}

/// File request body; the reason is trimmed and length-checked by the workflow
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FileRequestBody {
    pub target_id: Uuid,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Resolution body. The whole body is optional on approve and reject.
#[derive(Debug, Deserialize)]
pub struct ResolutionBody {
    #[serde(default)]
    pub log: Option<String>,
}

/// A request without a JSON body carries no log; a JSON body that does not
/// parse is still a bad request.
fn resolution_log(body: Result<Json<ResolutionBody>, JsonRejection>) -> AppResult<Option<String>> {
    match body {
        Ok(Json(body)) => Ok(body.log),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(None),
        Err(e) => Err(AppError::BadRequest(e.body_text())),
    }
}

/// Create delete request routes
pub fn delete_request_routes(state: AppState) -> Router<AppState> {
    let adjudication = Router::new()
        .route("/:id/approve", post(approve_request))
        .route("/:id/reject", post(reject_request))
        .route_layer(axum::middleware::from_fn_with_state(state, hq_middleware));

    Router::new()
        .route("/", get(list_requests).post(file_request))
        .route("/:id", get(get_request))
        .merge(adjudication)
}

/// List requests in filing order
pub async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<Vec<DeleteRequest>>> {
    Ok(Json(
        state.services.delete_requests().list_by_status(query.status).await?,
    ))
}

/// Get request by ID
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteRequest>> {
    Ok(Json(state.services.delete_requests().get(id).await?))
}

/// File a request against an account below the actor
pub async fn file_request(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<FileRequestBody>,
) -> AppResult<(StatusCode, Json<DeleteRequest>)> {
    let request = state
        .services
        .delete_requests()
        .file_request(current.id, body.target_id, body.reason)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Approve a pending request (HQ only)
pub async fn approve_request(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<ResolutionBody>, JsonRejection>,
) -> AppResult<Json<DeleteRequest>> {
    let log = resolution_log(body)?;
    let request = state
        .services
        .delete_requests()
        .approve(current.id, id, log)
        .await?;
    Ok(Json(request))
}

/// Reject a pending request (HQ only)
pub async fn reject_request(
    Extension(current): Extension<CurrentAccount>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<ResolutionBody>, JsonRejection>,
) -> AppResult<Json<DeleteRequest>> {
    let log = resolution_log(body)?;
    let request = state
        .services
        .delete_requests()
        .reject(current.id, id, log)
        .await?;
    Ok(Json(request))
}
