//! Outbound notification port and adapters.
//!
//! The workflow notifies at exactly two points: when a delete request is
//! filed (to the HQ channel) and when it is resolved (to the requester).
//! Delivery is best effort and never feeds back into state transitions.

mod logging;
mod message;
mod port;
mod recording;
mod retry;

pub use logging::LoggingNotifier;
pub use message::{delete_requested, delete_resolved, Notification, NotificationKind};
pub use port::{DeliveryOutcome, NotificationPort};
pub use recording::RecordingNotifier;
pub use retry::{RetryPolicy, RetryingNotifier};

#[cfg(any(test, feature = "test-utils"))]
pub use port::MockNotificationPort;
