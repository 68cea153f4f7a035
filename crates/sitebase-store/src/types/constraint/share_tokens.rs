//! Share tokens table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Share tokens table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum ShareTokenConstraints {
    // Token uniqueness constraints
    #[strum(serialize = "share_tokens_token_unique")]
    TokenUnique,

    // Token validation constraints
    #[strum(serialize = "share_tokens_token_length")]
    TokenLength,

    // Token chronological constraints
    #[strum(serialize = "share_tokens_expires_after_issued")]
    ExpiresAfterIssued,
}

impl ShareTokenConstraints {
    /// Creates a new [`ShareTokenConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ShareTokenConstraints::TokenUnique => ConstraintCategory::Uniqueness,
            ShareTokenConstraints::TokenLength => ConstraintCategory::Validation,
            ShareTokenConstraints::ExpiresAfterIssued => ConstraintCategory::Chronological,
        }
    }
}

impl From<ShareTokenConstraints> for String {
    #[inline]
    fn from(val: ShareTokenConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ShareTokenConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
