/// Project-scoped entity type definitions
///
/// Mirrors the records returned by the requirements API. Everything below a project
/// (users, pages, functionalities, workflows) carries the id of its owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::{FieldDefinition, FunctionalityKind};

/// Identifier issued by the requirements API for every stored record
pub type EntityId = i64;

/// Root container for all requirements data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A human role interacting with the target application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementUser {
    pub id: EntityId,
    pub project_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Free-text privilege labels; order carries no meaning
    #[serde(default)]
    pub privileges: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_access: Option<Vec<UserPageAccess>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functionality_access: Option<Vec<UserFunctionalityAccess>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RequirementUser {
    pub fn has_privilege(&self, label: &str) -> bool {
        self.privileges
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|p| p == label)
    }

    /// Page ids this user is granted access to
    pub fn accessible_pages(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.page_access
            .iter()
            .flatten()
            .filter(|a| a.can_access)
            .map(|a| a.page_id)
    }

    /// Functionality ids this user is granted access to
    pub fn accessible_functionalities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.functionality_access
            .iter()
            .flatten()
            .filter(|a| a.can_access)
            .map(|a| a.functionality_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPageAccess {
    pub id: EntityId,
    pub user_id: EntityId,
    pub page_id: EntityId,
    pub can_access: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFunctionalityAccess {
    pub id: EntityId,
    pub user_id: EntityId,
    pub functionality_id: EntityId,
    pub can_access: bool,
    pub created_at: DateTime<Utc>,
}

/// A screen of the target application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: EntityId,
    pub project_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Owned functionalities, only present when the API embeds them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functionalities: Option<Vec<Functionality>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A button, form or table on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Functionality {
    pub id: EntityId,
    pub page_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: FunctionalityKind,
    /// Only meaningful for forms and tables
    #[serde(default)]
    pub fields: Option<Vec<FieldDefinition>>,
    /// Only meaningful for forms and tables
    #[serde(default)]
    pub data_to_display: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
