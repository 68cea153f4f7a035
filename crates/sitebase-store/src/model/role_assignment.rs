//! Role assignment model for global capability grants.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::AppRole;

/// Role assignment row keyed by the (account, role) pair.
///
/// Persisted until revoked; granted and revoked only by existing
/// administrators. The role lookup used by policy evaluation reads this
/// table through a policy-free indirection, never through its own policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Account holding the role.
    pub account_id: Uuid,
    /// The granted role.
    pub role: AppRole,
    /// Administrator account that granted the role.
    pub granted_by: Uuid,
    /// Timestamp when the role was granted.
    pub created_at: Timestamp,
}
