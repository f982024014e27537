//! Retry decorator for any notification transport.

use std::time::Duration;

use async_trait::async_trait;

use super::message::Notification;
use super::port::{DeliveryOutcome, NotificationPort};

/// Bounded retry with a fixed pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(200))
    }
}

/// Wraps a transport and retries failed deliveries per [`RetryPolicy`].
pub struct RetryingNotifier<N> {
    inner: N,
    policy: RetryPolicy,
}

impl<N: NotificationPort> RetryingNotifier<N> {
    pub fn new(inner: N, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<N: NotificationPort> NotificationPort for RetryingNotifier<N> {
    async fn notify(&self, notification: Notification) -> DeliveryOutcome {
        let mut attempt = 1;
        loop {
            match self.inner.notify(notification.clone()).await {
                DeliveryOutcome::Delivered => return DeliveryOutcome::Delivered,
                DeliveryOutcome::Failed(reason) if attempt >= self.policy.max_attempts => {
                    tracing::warn!(
                        to = %notification.to,
                        attempts = attempt,
                        reason = %reason,
                        "Notification delivery gave up"
                    );
                    return DeliveryOutcome::Failed(reason);
                }
                DeliveryOutcome::Failed(reason) => {
                    tracing::debug!(
                        to = %notification.to,
                        attempt,
                        reason = %reason,
                        "Notification delivery failed, retrying"
                    );
                    attempt += 1;
                    tokio::time::sleep(self.policy.delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use mockall::Sequence;

    use super::*;
    use crate::notification::{MockNotificationPort, NotificationKind};

    fn message() -> Notification {
        Notification {
            kind: NotificationKind::DeleteApproved,
            to: "admin@example.com".to_string(),
            subject: "subject".to_string(),
            body: "body".to_string(),
            metadata: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_retries_until_delivered() {
        let mut inner = MockNotificationPort::new();
        let mut seq = Sequence::new();
        inner
            .expect_notify()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| DeliveryOutcome::Failed("relay busy".to_string()));
        inner
            .expect_notify()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| DeliveryOutcome::Delivered);

        let notifier = RetryingNotifier::new(inner, RetryPolicy::new(3, Duration::ZERO));
        assert_eq!(notifier.notify(message()).await, DeliveryOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let mut inner = MockNotificationPort::new();
        inner
            .expect_notify()
            .times(2)
            .returning(|_| DeliveryOutcome::Failed("relay down".to_string()));

        let notifier = RetryingNotifier::new(inner, RetryPolicy::new(2, Duration::ZERO));
        assert_eq!(
            notifier.notify(message()).await,
            DeliveryOutcome::Failed("relay down".to_string())
        );
    }

    #[test]
    fn test_policy_always_allows_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }
}
