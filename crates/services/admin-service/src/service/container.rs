//! Service Container - Centralized service access.
//!
//! Built once at startup and handed to every call site; nothing in the
//! crate reaches for a global.

use std::sync::Arc;
use std::time::Duration;

use super::{
    AccountDirectory, AccountService, DeleteRequestService, DeleteRequestWorkflow, OwnershipIndex,
    OwnershipService, SessionGate, SessionService,
};
use crate::config::AdminServiceConfig;
use crate::infra::{Clock, Database, IdGenerator, Persistence, SystemClock, UuidGenerator};
use crate::notification::{LoggingNotifier, NotificationPort, RetryPolicy, RetryingNotifier};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get account directory
    fn accounts(&self) -> Arc<dyn AccountService>;

    /// Get ownership index
    fn resources(&self) -> Arc<dyn OwnershipService>;

    /// Get delete request workflow
    fn delete_requests(&self) -> Arc<dyn DeleteRequestService>;

    /// Get session gate
    fn sessions(&self) -> Arc<dyn SessionService>;
}

/// Injectable collaborators shared by the services.
pub struct ServiceDeps {
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
    pub notifier: Arc<dyn NotificationPort>,
    /// HQ distribution channel for newly filed requests
    pub hq_address: String,
}

impl ServiceDeps {
    /// Production wiring: wall clock, random ids, log-only transport with retry
    pub fn from_config(config: &AdminServiceConfig) -> Self {
        let policy = RetryPolicy::new(
            config.notification.max_attempts,
            Duration::from_millis(config.notification.retry_delay_ms),
        );
        let transport = LoggingNotifier::new(config.notification.from_address.clone());

        Self {
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidGenerator),
            notifier: Arc::new(RetryingNotifier::new(transport, policy)),
            hq_address: config.notification.hq_address.clone(),
        }
    }
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    account_service: Arc<dyn AccountService>,
    ownership_service: Arc<dyn OwnershipService>,
    delete_request_service: Arc<dyn DeleteRequestService>,
    session_service: Arc<dyn SessionService>,
}

impl Services {
    /// Create service container from an opened database and config
    pub fn from_database(db: Arc<Database>, config: &AdminServiceConfig) -> Self {
        Self::assemble(db, ServiceDeps::from_config(config))
    }

    /// Wire every service over one unit of work
    pub fn assemble(db: Arc<Database>, deps: ServiceDeps) -> Self {
        let uow = Arc::new(Persistence::new(db));

        let account_service = Arc::new(AccountDirectory::new(
            uow.clone(),
            deps.ids.clone(),
            deps.clock.clone(),
        ));
        let ownership_service = Arc::new(OwnershipIndex::new(
            uow.clone(),
            deps.ids.clone(),
            deps.clock.clone(),
        ));
        let delete_request_service = Arc::new(DeleteRequestWorkflow::new(
            uow.clone(),
            deps.notifier,
            deps.ids,
            deps.clock,
            deps.hq_address,
        ));
        let session_service = Arc::new(SessionGate::new(uow));

        Self {
            account_service,
            ownership_service,
            delete_request_service,
            session_service,
        }
    }
}

impl ServiceContainer for Services {
    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    fn resources(&self) -> Arc<dyn OwnershipService> {
        self.ownership_service.clone()
    }

    fn delete_requests(&self) -> Arc<dyn DeleteRequestService> {
        self.delete_request_service.clone()
    }

    fn sessions(&self) -> Arc<dyn SessionService> {
        self.session_service.clone()
    }
}
