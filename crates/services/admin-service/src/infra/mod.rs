//! Infrastructure layer - Persistence and injectable runtime services.
//!
//! - Snapshot model and its storage backends
//! - In-process database with write-through persistence
//! - Unit of Work for repository access and transactions
//! - Clock and id generation seams

pub mod clock;
pub mod db;
pub mod ids;
pub mod snapshot;
pub mod store;
pub mod unit_of_work;

pub use clock::{Clock, SteppingClock, SystemClock};
pub use db::Database;
pub use ids::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use store::{JsonFileStore, MemoryStore, SnapshotStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockSnapshotStore;
