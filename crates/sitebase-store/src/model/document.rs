//! Document model for uploaded project files.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document row: metadata for an uploaded file, always project-scoped.
///
/// Rows authored through a portal token carry the originating token id in
/// `origin_token` and no creator account; the token-scoped contributor
/// policy keys off that tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Reference to the owning project.
    pub project_id: Uuid,
    /// Document display title.
    pub title: String,
    /// Object key within the document bucket.
    pub storage_key: String,
    /// Share token the row originated from, for portal uploads.
    pub origin_token: Option<Uuid>,
    /// Account that created the document, for account uploads.
    pub created_by: Option<Uuid>,
    /// Timestamp when the document was created.
    pub created_at: Timestamp,
    /// Timestamp when the document was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    /// Owning project ID.
    pub project_id: Uuid,
    /// Document title.
    pub title: String,
    /// Object key within the document bucket.
    pub storage_key: String,
    /// Originating share token, for portal uploads.
    pub origin_token: Option<Uuid>,
    /// Creating account, for account uploads.
    pub created_by: Option<Uuid>,
}

/// Data for updating a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocument {
    /// Document title.
    pub title: Option<String>,
    /// Object key within the document bucket.
    pub storage_key: Option<String>,
}

impl Document {
    /// Returns whether the row was authored through a portal token.
    #[inline]
    pub fn is_portal_authored(&self) -> bool {
        self.origin_token.is_some()
    }
}
