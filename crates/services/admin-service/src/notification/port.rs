//! Notification port definition.

use async_trait::async_trait;

use super::message::Notification;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed(String),
}

/// One-way outbound notification capability.
///
/// Implementations report failures through [`DeliveryOutcome`] rather than
/// an error; callers log the outcome and move on.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn notify(&self, notification: Notification) -> DeliveryOutcome;
}
