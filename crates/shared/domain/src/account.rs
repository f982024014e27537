//! Admin account entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{
    ROLE_ADMIN, ROLE_HQ, ROLE_MERCHANT, STATUS_ACTIVE, STATUS_PENDING_DELETE, STATUS_STOPPED,
};
use crate::error::DomainError;

/// Account roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountRole {
    Hq,
    Admin,
    Merchant,
}

impl AccountRole {
    /// Check if this role is headquarters
    pub fn is_hq(&self) -> bool {
        matches!(self, AccountRole::Hq)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Hq => ROLE_HQ,
            AccountRole::Admin => ROLE_ADMIN,
            AccountRole::Merchant => ROLE_MERCHANT,
        }
    }
}

impl FromStr for AccountRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_HQ => Ok(AccountRole::Hq),
            ROLE_ADMIN => Ok(AccountRole::Admin),
            ROLE_MERCHANT => Ok(AccountRole::Merchant),
            other => Err(DomainError::validation(format!("Unknown role '{}'", other))),
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account lifecycle status.
///
/// Deletion is represented by `PendingDelete`; records are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Stopped,
    PendingDelete,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => STATUS_ACTIVE,
            AccountStatus::Stopped => STATUS_STOPPED,
            AccountStatus::PendingDelete => STATUS_PENDING_DELETE,
        }
    }
}

impl FromStr for AccountStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_ACTIVE => Ok(AccountStatus::Active),
            STATUS_STOPPED => Ok(AccountStatus::Stopped),
            STATUS_PENDING_DELETE => Ok(AccountStatus::PendingDelete),
            other => Err(DomainError::validation(format!("Unknown status '{}'", other))),
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin account domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub role: AccountRole,
    /// Parent in the account tree (None = root)
    pub parent_id: Option<Uuid>,
    pub status: AccountStatus,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build an active account from creation data
    pub fn new(id: Uuid, data: NewAccount, now: DateTime<Utc>) -> Self {
        Self {
            id,
            role: data.role,
            parent_id: data.parent_id,
            status: AccountStatus::Active,
            name: data.name,
            email: data.email,
            phone: data.phone,
            profile_image: data.profile_image,
            description: data.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if account has the headquarters role
    pub fn is_hq(&self) -> bool {
        self.role.is_hq()
    }

    /// Overwrite the lifecycle status
    pub fn set_status(&mut self, status: AccountStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    /// Merge descriptive fields; id, role and parent are never touched here
    pub fn apply_profile(&mut self, update: UpdateProfile, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(image) = update.profile_image {
            self.profile_image = Some(image);
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        self.updated_at = now;
    }
}

/// Account creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub role: AccountRole,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// Display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    /// Contact address, also used for notifications
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewAccount {
    pub fn new(
        role: AccountRole,
        parent_id: Option<Uuid>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            role,
            parent_id,
            name: name.into(),
            email: email.into(),
            phone: None,
            profile_image: None,
            description: None,
        }
    }
}

/// Profile update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Account {
        let now = Utc::now();
        Account::new(
            Uuid::new_v4(),
            NewAccount::new(AccountRole::Admin, None, "Seoul Region", "seoul@example.com"),
            now,
        )
    }

    #[test]
    fn test_role_round_trips_through_strings() {
        assert_eq!("HQ".parse::<AccountRole>().unwrap(), AccountRole::Hq);
        assert_eq!("MERCHANT".parse::<AccountRole>().unwrap(), AccountRole::Merchant);
        assert_eq!(AccountRole::Admin.to_string(), "ADMIN");
        assert!("owner".parse::<AccountRole>().is_err());
        // Same spelling as the JSON form
        assert!("hq".parse::<AccountRole>().is_err());
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&AccountStatus::PendingDelete).unwrap();
        assert_eq!(json, "\"PENDING_DELETE\"");
        assert_eq!(
            "PENDING_DELETE".parse::<AccountStatus>().unwrap(),
            serde_json::from_str::<AccountStatus>(&json).unwrap()
        );
        assert!("pending_delete".parse::<AccountStatus>().is_err());
    }

    #[test]
    fn test_new_account_starts_active() {
        let account = sample();
        assert_eq!(account.status, AccountStatus::Active);
        assert!(account.parent_id.is_none());
        assert!(!account.is_hq());
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_apply_profile_keeps_structure() {
        let mut account = sample();
        let id = account.id;
        let later = account.updated_at + chrono::Duration::seconds(5);

        account.apply_profile(
            UpdateProfile {
                name: Some("Busan Region".to_string()),
                description: Some("south".to_string()),
                ..Default::default()
            },
            later,
        );

        assert_eq!(account.id, id);
        assert_eq!(account.role, AccountRole::Admin);
        assert_eq!(account.name, "Busan Region");
        assert_eq!(account.email, "seoul@example.com");
        assert_eq!(account.description.as_deref(), Some("south"));
        assert_eq!(account.updated_at, later);
    }

    #[test]
    fn test_new_account_validation() {
        let bad = NewAccount::new(AccountRole::Merchant, None, "", "not-an-email");
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
    }
}
