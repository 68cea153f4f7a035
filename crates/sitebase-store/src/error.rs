//! Error types and utilities for store operations.
//!
//! This module provides error handling for all state-layer operations,
//! including missing rows, domain-constraint violations and invalid input.

use std::borrow::Cow;

use crate::types::ConstraintViolation;

/// Type-erased error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Comprehensive error type for all state-layer operations.
///
/// This enum covers the error conditions that can occur when working with
/// the store: rows that do not exist, writes that violate a declared
/// constraint, and inputs outside their accepted domain.
#[derive(Debug, thiserror::Error)]
#[must_use = "store errors should be handled appropriately"]
pub enum StoreError {
    /// The referenced row does not exist.
    ///
    /// Carries the table name for diagnostics only; callers surfacing this to
    /// external principals should collapse it into a uniform denial.
    #[error("Row not found in {0}")]
    NotFound(&'static str),

    /// A write violated a declared table constraint.
    ///
    /// This is the store-level analogue of a database constraint failure:
    /// uniqueness of a membership pair or token string, chronological
    /// ordering of timestamps, or a value-length rule.
    #[error("Constraint violation: {0}")]
    Constraint(ConstraintViolation),

    /// An input value was outside its accepted domain.
    ///
    /// Raised at write time before any table is touched, e.g. a member
    /// position string that does not parse into the fixed position set.
    #[error("Invalid input: {0}")]
    InvalidInput(Cow<'static, str>),

    /// Unexpected error occurred.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl StoreError {
    /// Returns a structured constraint violation if this error represents one.
    ///
    /// # Returns
    ///
    /// - `Some(constraint)` if this error represents a constraint violation
    /// - `None` otherwise
    pub fn constraint_violation(&self) -> Option<&ConstraintViolation> {
        match self {
            StoreError::Constraint(violation) => Some(violation),
            _ => None,
        }
    }

    /// Returns whether this error indicates a missing row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Returns whether this error is terminal for the attempted operation.
    ///
    /// Constraint and domain failures require different data to succeed;
    /// nothing in this layer is retried automatically.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StoreError::Constraint(_) | StoreError::InvalidInput(_) | StoreError::NotFound(_)
        )
    }
}

/// Specialized [`Result`] type for store operations.
///
/// This is a convenience alias that uses [`StoreError`] as the error type,
/// making repository signatures cleaner and more consistent.
pub type StoreResult<T, E = StoreError> = Result<T, E>;
