//! Project model: the owned resource every scoped row resolves to.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Project row representing one engineering or construction engagement.
///
/// Every project-scoped resource reaches the project through a foreign-key
/// chain and resolves its access through the membership table, never through
/// direct per-row grants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: Uuid,
    /// Human-readable project name.
    pub name: String,
    /// Office reference code printed on issued documents.
    pub reference: String,
    /// Account that created the project.
    pub created_by: Uuid,
    /// Timestamp when the project was created.
    pub created_at: Timestamp,
    /// Timestamp when the project was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    /// Project name.
    pub name: String,
    /// Office reference code.
    pub reference: String,
    /// Creating account.
    pub created_by: Uuid,
}
