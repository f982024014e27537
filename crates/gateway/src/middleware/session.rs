//! Session middleware.
//!
//! Resolves the acting account through the session gate and hands it to
//! handlers as a request extension.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use serde::Serialize;
use uuid::Uuid;

use common::AppError;
use domain::{Account, AccountRole};

use crate::state::AppState;

/// Acting account for the current request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAccount {
    pub id: Uuid,
    pub role: AccountRole,
    pub name: String,
}

impl CurrentAccount {
    pub fn is_hq(&self) -> bool {
        self.role.is_hq()
    }
}

impl From<Account> for CurrentAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            role: account.role,
            name: account.name,
        }
    }
}

/// Rejects requests without an acting account and injects [`CurrentAccount`].
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let account = state.services.sessions().require_current().await?;

    request.extensions_mut().insert(CurrentAccount::from(account));

    Ok(next.run(request).await)
}

/// Adjudication screens: the acting account must be HQ.
pub async fn hq_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let account = state
        .services
        .sessions()
        .require_role(AccountRole::Hq)
        .await?;

    request.extensions_mut().insert(CurrentAccount::from(account));

    Ok(next.run(request).await)
}
