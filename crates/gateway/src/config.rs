//! Gateway configuration.

use std::env;

use admin_service_lib::config::AdminServiceConfig;
use common::ServiceConfig;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address and log level
    pub server: ServiceConfig,
    /// Settings of the embedded admin core
    pub admin: AdminServiceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server: ServiceConfig {
                service_name: defaults.server.service_name,
                host: env::var("GATEWAY_HOST").unwrap_or(defaults.server.host),
                port: env::var("GATEWAY_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
                log_level: env::var("RUST_LOG").unwrap_or(defaults.server.log_level),
            },
            admin: AdminServiceConfig::from_env(),
        }
    }

    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServiceConfig {
                service_name: "gateway".to_string(),
                ..ServiceConfig::default()
            },
            admin: AdminServiceConfig::default(),
        }
    }
}
