//! In-process database over the directory snapshot.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info};

use common::AppResult;

use super::snapshot::Snapshot;
use super::store::{MemoryStore, SnapshotStore};

/// Live snapshot plus its storage backend.
///
/// The snapshot is read once when the database is opened. Every successful
/// write is persisted before it becomes visible; a failed closure or a
/// failed save leaves the live state untouched.
pub struct Database {
    state: Mutex<Snapshot>,
    store: Arc<dyn SnapshotStore>,
}

impl Database {
    /// Open the database, rehydrating whatever the store holds.
    pub async fn open(store: Arc<dyn SnapshotStore>) -> AppResult<Self> {
        let snapshot = match store.load().await? {
            Some(snapshot) => {
                info!(
                    location = %store.describe(),
                    accounts = snapshot.accounts.len(),
                    requests = snapshot.delete_requests.len(),
                    "Snapshot loaded"
                );
                snapshot
            }
            None => {
                info!(location = %store.describe(), "No snapshot found, starting empty");
                Snapshot::default()
            }
        };

        Ok(Self {
            state: Mutex::new(snapshot),
            store,
        })
    }

    /// Empty database backed by memory only.
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(Snapshot::default()),
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Run a read-only query against the live snapshot.
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Snapshot) -> T + Send,
        T: Send,
    {
        let guard = self.state.lock().await;
        f(&*guard)
    }

    /// Run a mutation against a working copy, persist it, then commit.
    pub async fn write<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Snapshot) -> AppResult<T> + Send,
        T: Send,
    {
        let mut guard = self.state.lock().await;
        let mut working = guard.clone();

        let value = match f(&mut working) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "Mutation rejected, snapshot unchanged");
                return Err(e);
            }
        };

        if let Err(e) = self.store.save(&working).await {
            error!(location = %self.store.describe(), error = %e, "Snapshot save failed, rolled back");
            return Err(e);
        }

        *guard = working;
        Ok(value)
    }

    /// Copy of the live snapshot
    pub async fn export(&self) -> Snapshot {
        self.state.lock().await.clone()
    }
}
