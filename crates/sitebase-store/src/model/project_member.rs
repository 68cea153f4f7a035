//! Project member model representing a user's membership in a project.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::MemberPosition;

/// Project member row keyed by the (project, account) pair.
///
/// Membership is the single source of project access: relationship
/// predicates resolve "may this account touch this project" through this
/// table and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMember {
    /// Reference to the project.
    pub project_id: Uuid,
    /// Reference to the member's account.
    pub account_id: Uuid,
    /// Member's position in the project.
    pub position: MemberPosition,
    /// Whether the membership is active.
    pub is_active: bool,
    /// Last time the member accessed the project.
    pub last_accessed_at: Option<Timestamp>,
    /// Account that created this membership.
    pub created_by: Uuid,
    /// Timestamp when the membership was created.
    pub created_at: Timestamp,
    /// Timestamp when the membership was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new project member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProjectMember {
    /// Project ID.
    pub project_id: Uuid,
    /// Account ID.
    pub account_id: Uuid,
    /// Member position.
    pub position: MemberPosition,
    /// Creating account.
    pub created_by: Uuid,
}

/// Data for updating a project member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectMember {
    /// Member position.
    pub position: Option<MemberPosition>,
    /// Is active.
    pub is_active: Option<bool>,
}

impl ProjectMember {
    /// Returns whether the membership is currently active.
    #[inline]
    pub fn is_active_member(&self) -> bool {
        self.is_active
    }

    /// Returns whether the member can manage other memberships.
    #[inline]
    pub fn can_manage_members(&self) -> bool {
        self.is_active && self.position.is_administrative()
    }

    /// Returns whether the member may author project content.
    #[inline]
    pub fn can_author(&self) -> bool {
        self.is_active && self.position.can_author()
    }
}
