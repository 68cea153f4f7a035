//! Cover templates table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Cover templates table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum CoverTemplateConstraints {
    // Template validation constraints
    #[strum(serialize = "cover_templates_name_length")]
    NameLength,

    // Template uniqueness constraints
    #[strum(serialize = "cover_templates_name_unique_per_category")]
    NameUniquePerCategory,
}

impl CoverTemplateConstraints {
    /// Creates a new [`CoverTemplateConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            CoverTemplateConstraints::NameLength => ConstraintCategory::Validation,
            CoverTemplateConstraints::NameUniquePerCategory => ConstraintCategory::Uniqueness,
        }
    }
}

impl From<CoverTemplateConstraints> for String {
    #[inline]
    fn from(val: CoverTemplateConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for CoverTemplateConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
