//! Admin service configuration.

use std::env;

use common::{NotificationConfig, StorageConfig};

/// Admin service configuration.
#[derive(Debug, Clone, Default)]
pub struct AdminServiceConfig {
    /// Where the directory snapshot lives
    pub storage: StorageConfig,
    /// Outbound notification settings
    pub notification: NotificationConfig,
}

impl AdminServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let storage_defaults = StorageConfig::default();
        let notification_defaults = NotificationConfig::default();

        Self {
            storage: StorageConfig {
                snapshot_path: env::var("ADMIN_SNAPSHOT_PATH")
                    .unwrap_or(storage_defaults.snapshot_path),
            },
            notification: NotificationConfig {
                hq_address: env::var("HQ_NOTIFICATION_ADDRESS")
                    .unwrap_or(notification_defaults.hq_address),
                from_address: env::var("NOTIFICATION_FROM")
                    .unwrap_or(notification_defaults.from_address),
                max_attempts: env::var("NOTIFICATION_MAX_ATTEMPTS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(notification_defaults.max_attempts),
                retry_delay_ms: env::var("NOTIFICATION_RETRY_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(notification_defaults.retry_delay_ms),
            },
        }
    }

    /// Override the snapshot location (CLI flag)
    pub fn with_snapshot_path(mut self, path: impl Into<String>) -> Self {
        self.storage.snapshot_path = path.into();
        self
    }
}
