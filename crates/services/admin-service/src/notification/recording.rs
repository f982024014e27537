//! In-memory notifier that keeps every message it is handed.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::message::Notification;
use super::port::{DeliveryOutcome, NotificationPort};

/// Captures notifications instead of sending them.
///
/// Integration tests use it to assert on exactly which messages a workflow
/// emitted.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    fail_with: Option<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records messages but reports every delivery as failed
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(reason.into()),
        }
    }

    /// All messages handed to this notifier, in call order
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }

    /// Messages addressed to `address`
    pub async fn sent_to(&self, address: &str) -> Vec<Notification> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|n| n.to == address)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl NotificationPort for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> DeliveryOutcome {
        self.sent.lock().await.push(notification);
        match &self.fail_with {
            Some(reason) => DeliveryOutcome::Failed(reason.clone()),
            None => DeliveryOutcome::Delivered,
        }
    }
}
