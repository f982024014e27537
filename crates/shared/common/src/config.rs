//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Base service configuration shared by all binaries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

/// Snapshot storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// File holding the whole serialized directory state
    pub snapshot_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "data/admin-snapshot.json".to_string(),
        }
    }
}

/// Outbound notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// HQ distribution channel for newly filed requests
    pub hq_address: String,
    /// Sender address
    pub from_address: String,
    /// Delivery attempts per message (1 = no retry)
    pub max_attempts: u32,
    /// Pause between attempts in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            hq_address: "hq@example.com".to_string(),
            from_address: "noreply@example.com".to_string(),
            max_attempts: 3,
            retry_delay_ms: 200,
        }
    }
}
