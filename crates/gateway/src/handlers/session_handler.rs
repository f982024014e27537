//! Session handlers: choose, show and clear the acting account.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::Account;

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Sign-in request body
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub account_id: Uuid,
}

/// Current session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub account: Option<Account>,
}

/// Create session routes
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/", get(show).post(sign_in).delete(sign_out))
}

/// Show the acting account, if any
pub async fn show(State(state): State<AppState>) -> AppResult<Json<SessionResponse>> {
    let account = state.services.sessions().current().await?;
    Ok(Json(SessionResponse { account }))
}

/// Act as the given account
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SignInRequest>,
) -> AppResult<Json<SessionResponse>> {
    let account = state.services.sessions().sign_in(body.account_id).await?;
    Ok(Json(SessionResponse {
        account: Some(account),
    }))
}

/// Stop acting as anyone
pub async fn sign_out(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.services.sessions().sign_out().await?;
    Ok(StatusCode::NO_CONTENT)
}
