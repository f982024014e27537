//! Route configuration.

use axum::{middleware, Router};

use crate::handlers::{
    account_routes, delete_request_routes, health_routes, resource_routes, session_routes,
};
use crate::middleware::session_middleware;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let signed_in = || middleware::from_fn_with_state(state.clone(), session_middleware);

    Router::new()
        // Health check (no session)
        .nest("/health", health_routes())
        // Session selection (no session required to pick one)
        .nest("/session", session_routes())
        // Directory and workflow routes (session required)
        .nest("/accounts", account_routes(state.clone()).route_layer(signed_in()))
        .nest("/resources", resource_routes().route_layer(signed_in()))
        .nest(
            "/delete-requests",
            delete_request_routes(state.clone()).route_layer(signed_in()),
        )
        .with_state(state)
}
