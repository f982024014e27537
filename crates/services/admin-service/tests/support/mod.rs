//! Shared fixtures for admin-service integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use admin_service_lib::infra::{Database, SequentialIdGenerator, SnapshotStore, SteppingClock};
use admin_service_lib::notification::RecordingNotifier;
use admin_service_lib::seed::{self, SeededTree};
use admin_service_lib::service::{ServiceDeps, Services};

pub const HQ_CHANNEL: &str = "hq-desk@example.com";

pub struct Harness {
    pub db: Arc<Database>,
    pub services: Services,
    pub notifier: Arc<RecordingNotifier>,
    pub tree: SeededTree,
}

pub fn deps(notifier: Arc<RecordingNotifier>) -> ServiceDeps {
    ServiceDeps {
        clock: Arc::new(SteppingClock::per_second()),
        ids: Arc::new(SequentialIdGenerator::new()),
        notifier,
        hq_address: HQ_CHANNEL.to_string(),
    }
}

/// Seeded in-memory directory with a recording notifier.
pub async fn harness() -> Harness {
    harness_with_notifier(RecordingNotifier::new()).await
}

pub async fn harness_with_notifier(notifier: RecordingNotifier) -> Harness {
    let db = Arc::new(Database::in_memory());
    seeded(db, Arc::new(notifier)).await
}

/// Seeded directory over an explicit store.
pub async fn harness_on(store: Arc<dyn SnapshotStore>) -> Harness {
    let db = Arc::new(Database::open(store).await.unwrap());
    seeded(db, Arc::new(RecordingNotifier::new())).await
}

async fn seeded(db: Arc<Database>, notifier: Arc<RecordingNotifier>) -> Harness {
    let services = Services::assemble(db.clone(), deps(notifier.clone()));
    let tree = seed::bootstrap(&services).await.unwrap().unwrap();
    Harness {
        db,
        services,
        notifier,
        tree,
    }
}
