//! Role assignments table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Role assignments table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum RoleAssignmentConstraints {
    // Assignment uniqueness constraints
    #[strum(serialize = "role_assignments_pair_unique")]
    AssignmentPairUnique,
}

impl RoleAssignmentConstraints {
    /// Creates a new [`RoleAssignmentConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            RoleAssignmentConstraints::AssignmentPairUnique => ConstraintCategory::Uniqueness,
        }
    }
}

impl From<RoleAssignmentConstraints> for String {
    #[inline]
    fn from(val: RoleAssignmentConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for RoleAssignmentConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
