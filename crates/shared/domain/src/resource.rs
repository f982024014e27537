//! Owner-scoped content records (Connections and News).

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{RESOURCE_CONNECTION, RESOURCE_NEWS};
use crate::error::DomainError;

/// Kind of owned resource. Both kinds share one ownership index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Connection,
    News,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Connection => RESOURCE_CONNECTION,
            ResourceKind::News => RESOURCE_NEWS,
        }
    }
}

impl FromStr for ResourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            RESOURCE_CONNECTION => Ok(ResourceKind::Connection),
            RESOURCE_NEWS => Ok(ResourceKind::News),
            other => Err(DomainError::validation(format!("Unknown resource kind '{}'", other))),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content fields of a resource
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A piece of content scoped to exactly one owning account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedResource {
    pub id: Uuid,
    pub kind: ResourceKind,
    pub owner_id: Uuid,
    #[serde(flatten)]
    pub content: ResourceContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource {
    pub fn new(id: Uuid, data: NewResource, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: data.kind,
            owner_id: data.owner_id,
            content: data.content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, account_id: Uuid) -> bool {
        self.owner_id == account_id
    }

    /// Merge content fields and refresh `updated_at`
    pub fn apply(&mut self, update: UpdateResource, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.content.title = title;
        }
        if let Some(body) = update.body {
            self.content.body = body;
        }
        if let Some(link) = update.link {
            self.content.link = Some(link);
        }
        if let Some(image_url) = update.image_url {
            self.content.image_url = Some(image_url);
        }
        self.updated_at = now;
    }
}

/// Resource creation data
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    pub kind: ResourceKind,
    pub owner_id: Uuid,
    #[serde(flatten)]
    #[validate(nested)]
    pub content: ResourceContent,
}

/// Resource update data; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResource {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub body: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
}
