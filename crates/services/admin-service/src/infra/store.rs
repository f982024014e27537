//! Snapshot storage backends.
//!
//! The whole directory lives under a single storage key. Backends only
//! load and save complete blobs; there is no partial persistence.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use common::AppResult;

use super::snapshot::Snapshot;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Storage backend for the serialized snapshot.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the stored blob, `None` when nothing has been written yet
    async fn load(&self) -> AppResult<Option<Snapshot>>;

    /// Replace the stored blob
    async fn save(&self, snapshot: &Snapshot) -> AppResult<()>;

    /// Human readable location, for logs
    fn describe(&self) -> String;
}

/// JSON file backend. Writes go to a sibling temp file that is renamed
/// over the target, so readers never observe a half-written blob.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> AppResult<Option<Snapshot>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "Snapshot written");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backend holding the serialized blob (tests).
#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, as if it had been saved earlier
    pub fn with_snapshot(snapshot: &Snapshot) -> AppResult<Self> {
        Ok(Self {
            blob: Mutex::new(Some(serde_json::to_string(snapshot)?)),
            saves: AtomicUsize::new(0),
        })
    }

    /// Number of successful saves since construction
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Raw stored JSON
    pub async fn raw(&self) -> Option<String> {
        self.blob.lock().await.clone()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load(&self) -> AppResult<Option<Snapshot>> {
        match self.blob.lock().await.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> AppResult<()> {
        let json = serde_json::to_string(snapshot)?;
        *self.blob.lock().await = Some(json);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
