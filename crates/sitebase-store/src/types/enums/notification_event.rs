//! Notification event enumeration for emitted notification records.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the event that produced a notification record.
///
/// Events are emitted by write-path triggers in the owning repository and
/// consumed by an external delivery channel; the store's obligation ends at
/// producing the record.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
pub enum NotificationEvent {
    /// A task gained an assignee where it previously had none
    #[strum(serialize = "task:assigned")]
    #[serde(rename = "task:assigned")]
    #[default]
    TaskAssigned,

    /// A task moved from one assignee to another
    #[strum(serialize = "task:reassigned")]
    #[serde(rename = "task:reassigned")]
    TaskReassigned,
}

impl NotificationEvent {
    /// Returns whether this event addresses a task assignee.
    #[inline]
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            NotificationEvent::TaskAssigned | NotificationEvent::TaskReassigned
        )
    }
}
