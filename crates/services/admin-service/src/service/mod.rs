//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill the
//! directory use cases. Role checks live here, next to the mutation they
//! guard, so a caller that skips the HTTP layer still cannot resolve a
//! request or stop an account without being HQ.

mod account_directory;
pub mod container;
mod delete_request_workflow;
mod ownership_index;
mod session_gate;

use uuid::Uuid;

use common::{AppError, AppResult};
use domain::Account;

use crate::infra::UnitOfWork;

// Service Container
pub use container::{ServiceContainer, ServiceDeps, Services};

// Service traits and implementations
pub use account_directory::{AccountDirectory, AccountService};
pub use delete_request_workflow::{DeleteRequestService, DeleteRequestWorkflow};
pub use ownership_index::{OwnershipIndex, OwnershipService};
pub use session_gate::{SessionGate, SessionService};

#[cfg(any(test, feature = "test-utils"))]
pub use account_directory::MockAccountService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use delete_request_workflow::MockDeleteRequestService;
#[cfg(any(test, feature = "test-utils"))]
pub use ownership_index::MockOwnershipService;
#[cfg(any(test, feature = "test-utils"))]
pub use session_gate::MockSessionService;

/// Resolve the acting account; an id that matches nobody is no actor at all.
pub(crate) async fn load_actor<U: UnitOfWork>(uow: &U, actor_id: Uuid) -> AppResult<Account> {
    uow.accounts()
        .find_by_id(actor_id)
        .await?
        .ok_or(AppError::Unauthorized)
}

pub(crate) fn ensure_hq(actor: &Account) -> AppResult<()> {
    if actor.is_hq() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Trim optional free text, drop it when blank and bound its length.
pub(crate) fn normalize_note(
    text: Option<String>,
    max_chars: usize,
    field: &str,
) -> AppResult<Option<String>> {
    let Some(text) = text else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max_chars {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, max_chars
        )));
    }
    Ok(Some(trimmed.to_string()))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_note() {
        assert_eq!(normalize_note(None, 10, "Reason").unwrap(), None);
        assert_eq!(normalize_note(Some("   ".into()), 10, "Reason").unwrap(), None);
        assert_eq!(
            normalize_note(Some("  fraud ".into()), 10, "Reason").unwrap(),
            Some("fraud".to_string())
        );
        assert!(matches!(
            normalize_note(Some("x".repeat(11)), 10, "Reason"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_multibyte_notes_count_characters() {
        let note = "본사에서 삭제 승인".to_string();
        assert!(normalize_note(Some(note), 10, "Log").unwrap().is_some());
    }
}
