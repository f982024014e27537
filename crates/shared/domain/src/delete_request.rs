//! Delete request entity and its state machine.
//!
//! ```text
//! (none) --file--> REQUESTED --approve--> APPROVED  (terminal)
//!                            \--reject--> REJECTED  (terminal)
//! ```

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{REQUEST_APPROVED, REQUEST_REJECTED, REQUEST_REQUESTED};
use crate::error::{DomainError, DomainResult};

/// Delete request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteRequestStatus {
    Requested,
    Approved,
    Rejected,
}

impl DeleteRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteRequestStatus::Requested => REQUEST_REQUESTED,
            DeleteRequestStatus::Approved => REQUEST_APPROVED,
            DeleteRequestStatus::Rejected => REQUEST_REJECTED,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, DeleteRequestStatus::Requested)
    }
}

impl FromStr for DeleteRequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            REQUEST_REQUESTED => Ok(DeleteRequestStatus::Requested),
            REQUEST_APPROVED => Ok(DeleteRequestStatus::Approved),
            REQUEST_REJECTED => Ok(DeleteRequestStatus::Rejected),
            other => Err(DomainError::validation(format!("Unknown request status '{}'", other))),
        }
    }
}

impl std::fmt::Display for DeleteRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HQ adjudication outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Status a request lands in after this decision
    pub fn resulting_status(&self) -> DeleteRequestStatus {
        match self {
            Decision::Approve => DeleteRequestStatus::Approved,
            Decision::Reject => DeleteRequestStatus::Rejected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "approved",
            Decision::Reject => "rejected",
        }
    }
}

/// Proposal to mark one account for deletion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub id: Uuid,
    pub target_admin_id: Uuid,
    pub requested_by_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub status: DeleteRequestStatus,
    pub created_at: DateTime<Utc>,
    /// Set when the request is resolved
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
    /// HQ account that resolved the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_by_id: Option<Uuid>,
    /// Resolution note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

impl DeleteRequest {
    /// Create a freshly filed request
    pub fn new(
        id: Uuid,
        target_admin_id: Uuid,
        requested_by_id: Uuid,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            target_admin_id,
            requested_by_id,
            reason,
            status: DeleteRequestStatus::Requested,
            created_at: now,
            processed_at: None,
            processed_by_id: None,
            log: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == DeleteRequestStatus::Requested
    }

    /// Move REQUESTED to a terminal state. Terminal requests never move again.
    pub fn resolve(
        &mut self,
        decision: Decision,
        processed_by: Uuid,
        log: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::invariant(format!(
                "delete request {} is already {}",
                self.id, self.status
            )));
        }

        self.status = decision.resulting_status();
        self.processed_at = Some(now);
        self.processed_by_id = Some(processed_by);
        self.log = log;
        Ok(())
    }
}
