//! Cover template model for issued-document layouts.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::TemplateCategory;

/// Cover template row.
///
/// At most one template per category carries `is_default`; the repository
/// un-flags competing defaults in the same transaction that sets a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverTemplate {
    /// Unique template identifier.
    pub id: Uuid,
    /// Document category the template belongs to.
    pub category: TemplateCategory,
    /// Template display name.
    pub name: String,
    /// Whether this is the active default for its category.
    pub is_default: bool,
    /// Layout definition consumed by the rendering pipeline.
    pub layout: serde_json::Value,
    /// Account that created the template.
    pub created_by: Uuid,
    /// Timestamp when the template was created.
    pub created_at: Timestamp,
    /// Timestamp when the template was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new cover template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCoverTemplate {
    /// Template category.
    pub category: TemplateCategory,
    /// Template name.
    pub name: String,
    /// Layout definition; defaults to an empty object.
    pub layout: Option<serde_json::Value>,
    /// Whether to make this the category default on creation.
    pub is_default: Option<bool>,
    /// Creating account.
    pub created_by: Uuid,
}
