//! Log-only notification transport.
//!
//! There is no mail relay in this deployment, so messages are written to the
//! log and reported as delivered.

use async_trait::async_trait;

use super::message::Notification;
use super::port::{DeliveryOutcome, NotificationPort};

/// Notifier that renders each message into the log
#[derive(Debug, Clone)]
pub struct LoggingNotifier {
    from: String,
}

impl LoggingNotifier {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl NotificationPort for LoggingNotifier {
    async fn notify(&self, notification: Notification) -> DeliveryOutcome {
        tracing::info!(
            to = %notification.to,
            from = %self.from,
            subject = %notification.subject,
            kind = ?notification.kind,
            "Dispatching notification"
        );

        tracing::info!(
            "=== NOTIFICATION (log only) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ===============================",
            self.from,
            notification.to,
            notification.subject,
            notification.body
        );

        DeliveryOutcome::Delivered
    }
}
