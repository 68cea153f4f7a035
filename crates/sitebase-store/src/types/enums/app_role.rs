//! Application-wide role enumeration for global capability grants.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines a global capability assigned to an account.
///
/// Roles are many-to-many with accounts and are granted or revoked only by
/// existing administrators. They are orthogonal to project positions: a role
/// applies platform-wide, a [`MemberPosition`] applies within one project.
///
/// [`MemberPosition`]: super::MemberPosition
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AppRole {
    /// Full administrative override across every project and resource
    #[serde(rename = "admin")]
    Admin,

    /// Internal staff member with access to shared catalogs
    #[serde(rename = "staff")]
    Staff,
}

impl AppRole {
    /// Returns whether this role carries the administrative override.
    #[inline]
    pub const fn is_administrator(self) -> bool {
        matches!(self, AppRole::Admin)
    }
}
