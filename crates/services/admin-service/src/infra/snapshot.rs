//! Serialized directory state.
//!
//! Accounts, owned resources, delete requests and the current session are
//! persisted together as one JSON blob and rehydrated wholesale at boot.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::{Account, DeleteRequest, OwnedResource};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Whole-directory state. Vectors keep insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub resources: Vec<OwnedResource>,
    #[serde(default)]
    pub delete_requests: Vec<DeleteRequest>,
    /// Acting account of the current session
    #[serde(default)]
    pub session: Option<Uuid>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            accounts: Vec::new(),
            resources: Vec::new(),
            delete_requests: Vec::new(),
            session: None,
        }
    }
}

impl Snapshot {
    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    pub fn has_account(&self, id: Uuid) -> bool {
        self.account(id).is_some()
    }

    /// Parent lookup in the shape the hierarchy helpers expect
    pub fn parent_of(&self, id: Uuid) -> Option<Option<Uuid>> {
        self.account(id).map(|a| a.parent_id)
    }

    pub fn resource(&self, id: Uuid) -> Option<&OwnedResource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn resource_mut(&mut self, id: Uuid) -> Option<&mut OwnedResource> {
        self.resources.iter_mut().find(|r| r.id == id)
    }

    /// Remove a resource, returning it if it existed
    pub fn take_resource(&mut self, id: Uuid) -> Option<OwnedResource> {
        let index = self.resources.iter().position(|r| r.id == id)?;
        Some(self.resources.remove(index))
    }

    pub fn delete_request(&self, id: Uuid) -> Option<&DeleteRequest> {
        self.delete_requests.iter().find(|r| r.id == id)
    }

    pub fn delete_request_mut(&mut self, id: Uuid) -> Option<&mut DeleteRequest> {
        self.delete_requests.iter_mut().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_blob_rehydrates_with_defaults() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
    }

    #[test]
    fn test_take_resource_missing() {
        let mut snapshot = Snapshot::default();
        assert!(snapshot.take_resource(Uuid::nil()).is_none());
    }
}
