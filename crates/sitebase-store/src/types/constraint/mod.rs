//! Table constraint violations organized by functional area.
//!
//! This module enumerates the declared write-time constraints of the state
//! layer, organized per table, with a unified wrapper for error reporting.

mod cover_templates;
mod project_members;
mod role_assignments;
mod share_tokens;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::cover_templates::CoverTemplateConstraints;
pub use self::project_members::ProjectMemberConstraints;
pub use self::role_assignments::RoleAssignmentConstraints;
pub use self::share_tokens::ShareTokenConstraints;

/// Functional category of a constraint violation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintCategory {
    /// A uniqueness rule over one or more columns.
    Uniqueness,
    /// A value-domain or length rule on a single column.
    Validation,
    /// A chronological ordering rule between timestamp columns.
    Chronological,
}

/// Unified constraint violation enum that can represent any table constraint.
///
/// This enum wraps all specific constraint types, providing a single interface
/// for handling any constraint violation while keeping the per-table
/// enumerations independently usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintViolation {
    ProjectMember(ProjectMemberConstraints),
    RoleAssignment(RoleAssignmentConstraints),
    ShareToken(ShareTokenConstraints),
    CoverTemplate(CoverTemplateConstraints),
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from a constraint name.
    ///
    /// # Returns
    ///
    /// - `Some(violation)` if the name matches a declared constraint
    /// - `None` for unknown names
    pub fn new(constraint: &str) -> Option<Self> {
        if let Some(c) = ProjectMemberConstraints::new(constraint) {
            return Some(ConstraintViolation::ProjectMember(c));
        }
        if let Some(c) = RoleAssignmentConstraints::new(constraint) {
            return Some(ConstraintViolation::RoleAssignment(c));
        }
        if let Some(c) = ShareTokenConstraints::new(constraint) {
            return Some(ConstraintViolation::ShareToken(c));
        }
        if let Some(c) = CoverTemplateConstraints::new(constraint) {
            return Some(ConstraintViolation::CoverTemplate(c));
        }
        None
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::ProjectMember(c) => c.categorize(),
            ConstraintViolation::RoleAssignment(c) => c.categorize(),
            ConstraintViolation::ShareToken(c) => c.categorize(),
            ConstraintViolation::CoverTemplate(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::ProjectMember(c) => c.fmt(f),
            ConstraintViolation::RoleAssignment(c) => c.fmt(f),
            ConstraintViolation::ShareToken(c) => c.fmt(f),
            ConstraintViolation::CoverTemplate(c) => c.fmt(f),
        }
    }
}
