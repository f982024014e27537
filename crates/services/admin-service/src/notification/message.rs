//! Notification payloads for the delete request workflow.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use domain::{Account, Decision, DeleteRequest};

/// Which workflow transition produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    DeleteRequested,
    DeleteApproved,
    DeleteRejected,
}

/// Outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    /// Recipient address
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Structured copy of the identities carried in the body
    pub metadata: BTreeMap<String, String>,
}

const NO_REASON: &str = "(no reason given)";

/// Message sent to the HQ distribution channel when a request is filed.
pub fn delete_requested(
    hq_address: &str,
    request: &DeleteRequest,
    target: &Account,
    requester: &Account,
) -> Notification {
    let reason = request.reason.as_deref().unwrap_or(NO_REASON);
    let timestamp = request.created_at.to_rfc3339();

    let body = format!(
        "A delete request was filed.\n\
         \n\
         Target:    {} ({}, {})\n\
         Requester: {} ({}, {})\n\
         Reason:    {}\n\
         Filed at:  {}\n\
         Request:   {}",
        target.name,
        target.id,
        target.role,
        requester.name,
        requester.id,
        requester.role,
        reason,
        timestamp,
        request.id,
    );

    let metadata = BTreeMap::from([
        ("request_id".to_string(), request.id.to_string()),
        ("target_id".to_string(), target.id.to_string()),
        ("target_name".to_string(), target.name.clone()),
        ("requester_id".to_string(), requester.id.to_string()),
        ("requester_name".to_string(), requester.name.clone()),
        ("reason".to_string(), reason.to_string()),
        ("timestamp".to_string(), timestamp),
    ]);

    Notification {
        kind: NotificationKind::DeleteRequested,
        to: hq_address.to_string(),
        subject: format!("[Delete request] {}", target.name),
        body,
        metadata,
    }
}

/// Message sent back to the requester once HQ has decided.
pub fn delete_resolved(
    request: &DeleteRequest,
    decision: Decision,
    target: &Account,
    requester: &Account,
) -> Notification {
    let reason = request.reason.as_deref().unwrap_or(NO_REASON);
    let log = request.log.as_deref().unwrap_or("");
    let timestamp = request
        .processed_at
        .unwrap_or(request.created_at)
        .to_rfc3339();

    let body = format!(
        "Your delete request has been {}.\n\
         \n\
         Target:    {} ({})\n\
         Reason:    {}\n\
         Decision:  {}\n\
         Note:      {}\n\
         Decided at: {}\n\
         Request:   {}",
        decision.as_str(),
        target.name,
        target.id,
        reason,
        decision.as_str(),
        log,
        timestamp,
        request.id,
    );

    let kind = match decision {
        Decision::Approve => NotificationKind::DeleteApproved,
        Decision::Reject => NotificationKind::DeleteRejected,
    };

    let metadata = BTreeMap::from([
        ("request_id".to_string(), request.id.to_string()),
        ("target_id".to_string(), target.id.to_string()),
        ("target_name".to_string(), target.name.clone()),
        ("reason".to_string(), reason.to_string()),
        ("decision".to_string(), decision.as_str().to_string()),
        ("log".to_string(), log.to_string()),
        ("timestamp".to_string(), timestamp),
    ]);

    Notification {
        kind,
        to: requester.email.clone(),
        subject: format!("[Delete request {}] {}", decision.as_str(), target.name),
        body,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use domain::{AccountRole, NewAccount};
    use uuid::Uuid;

    use super::*;

    fn account(n: u128, role: AccountRole, name: &str) -> Account {
        Account::new(
            Uuid::from_u128(n),
            NewAccount::new(role, None, name, format!("{}@example.com", n)),
            Utc::now(),
        )
    }

    #[test]
    fn test_filed_message_carries_identities() {
        let target = account(3, AccountRole::Merchant, "Gangnam Store");
        let requester = account(2, AccountRole::Admin, "Seoul Office");
        let request = DeleteRequest::new(
            Uuid::from_u128(9),
            target.id,
            requester.id,
            Some("fraud".to_string()),
            Utc::now(),
        );

        let message = delete_requested("hq@example.com", &request, &target, &requester);

        assert_eq!(message.kind, NotificationKind::DeleteRequested);
        assert_eq!(message.to, "hq@example.com");
        assert!(message.body.contains("Gangnam Store"));
        assert!(message.body.contains("Seoul Office"));
        assert!(message.body.contains("fraud"));
        assert_eq!(message.metadata["target_id"], target.id.to_string());
        assert_eq!(message.metadata["requester_id"], requester.id.to_string());
    }

    #[test]
    fn test_resolved_message_goes_to_requester() {
        let target = account(3, AccountRole::Merchant, "Gangnam Store");
        let requester = account(2, AccountRole::Admin, "Seoul Office");
        let mut request =
            DeleteRequest::new(Uuid::from_u128(9), target.id, requester.id, None, Utc::now());
        request
            .resolve(Decision::Reject, Uuid::from_u128(1), Some("keep it".to_string()), Utc::now())
            .unwrap();

        let message = delete_resolved(&request, Decision::Reject, &target, &requester);

        assert_eq!(message.kind, NotificationKind::DeleteRejected);
        assert_eq!(message.to, "2@example.com");
        assert_eq!(message.metadata["decision"], "rejected");
        assert_eq!(message.metadata["log"], "keep it");
        assert_eq!(message.metadata["reason"], NO_REASON);
    }
}
