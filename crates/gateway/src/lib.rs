//! Admin Gateway Library
//!
//! HTTP REST surface over the admin core: account directory, owned
//! resources, delete requests and the active session.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use admin_service_lib::{open_services, seed};

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig, seed_demo: bool) -> Result<(), Box<dyn std::error::Error>> {
    let services = Arc::new(open_services(&config.admin).await?);

    if seed_demo {
        if let Some(tree) = seed::bootstrap(services.as_ref()).await? {
            info!(hq = %tree.hq.id, admin = %tree.admin.id, merchant = %tree.merchant.id, "Seeded demo directory");
        }
    }

    let addr: SocketAddr = config.bind_address().parse()?;
    let service_name = config.server.service_name.clone();
    let state = AppState::new(services, config);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    info!(service = %service_name, "Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
