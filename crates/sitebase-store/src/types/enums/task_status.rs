//! Task status enumeration for project tasks.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the workflow state of a project task.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet started
    #[default]
    Open,

    /// Actively being worked on
    InProgress,

    /// Waiting on an external dependency
    Blocked,

    /// Completed
    Done,
}

impl TaskStatus {
    /// Returns whether the task still requires work.
    #[inline]
    pub const fn is_open(self) -> bool {
        !matches!(self, TaskStatus::Done)
    }
}
