//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Account Roles
// =============================================================================

/// Headquarters, the sole super-role
pub const ROLE_HQ: &str = "HQ";

/// Regional or intermediate administrator
pub const ROLE_ADMIN: &str = "ADMIN";

/// Storefront operator (leaf of the tree)
pub const ROLE_MERCHANT: &str = "MERCHANT";

// =============================================================================
// Account Status
// =============================================================================

pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_STOPPED: &str = "STOPPED";
pub const STATUS_PENDING_DELETE: &str = "PENDING_DELETE";

// =============================================================================
// Delete Requests
// =============================================================================

pub const REQUEST_REQUESTED: &str = "REQUESTED";
pub const REQUEST_APPROVED: &str = "APPROVED";
pub const REQUEST_REJECTED: &str = "REJECTED";

/// Maximum length of a delete request reason
pub const MAX_REASON_LENGTH: usize = 1000;

/// Maximum length of a resolution log entry
pub const MAX_RESOLUTION_LOG_LENGTH: usize = 1000;

// =============================================================================
// Resources
// =============================================================================

pub const RESOURCE_CONNECTION: &str = "connection";
pub const RESOURCE_NEWS: &str = "news";
