//! Template category enumeration for cover templates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the document category a cover template belongs to.
///
/// At most one template per category carries the default flag; the store
/// enforces that invariant on every default-setting write.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    /// Cover page for issued document bundles
    #[default]
    CoverPage,

    /// Invoice layout
    Invoice,

    /// Final account statement layout
    FinalAccount,

    /// Periodic progress report layout
    Report,
}
