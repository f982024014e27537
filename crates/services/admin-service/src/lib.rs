//! Admin Service Library
//!
//! The admin hierarchy core: an account tree, owner-scoped resources and
//! the HQ-adjudicated delete request workflow, persisted as one JSON
//! snapshot. Used by the `admin-service` operator CLI and embedded by the
//! HTTP gateway.

pub mod config;
pub mod infra;
pub mod notification;
pub mod repository;
pub mod seed;
pub mod service;

use std::sync::Arc;

use common::AppResult;

use crate::config::AdminServiceConfig;
use crate::infra::{Database, JsonFileStore};
use crate::service::Services;

/// Load the snapshot named by the config.
pub async fn open_database(config: &AdminServiceConfig) -> AppResult<Arc<Database>> {
    let store = JsonFileStore::new(&config.storage.snapshot_path);
    let db = Database::open(Arc::new(store)).await?;
    Ok(Arc::new(db))
}

/// Open storage and wire the production services over it.
pub async fn open_services(config: &AdminServiceConfig) -> AppResult<Services> {
    let db = open_database(config).await?;
    Ok(Services::from_database(db, config))
}
