//! Assignment notification model for emitted notification records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::NotificationEvent;

/// Notification row produced by a write-path trigger.
///
/// The store's obligation ends at producing this record; delivery is an
/// external concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentNotification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Account receiving the notification.
    pub account_id: Uuid,
    /// Event that produced the notification.
    pub event: NotificationEvent,
    /// Task the event refers to.
    pub task_id: Uuid,
    /// Project the task belongs to.
    pub project_id: Uuid,
    /// Human-readable message.
    pub message: String,
    /// Whether the notification has been read.
    pub is_read: bool,
    /// Timestamp when the notification was read.
    pub read_at: Option<Timestamp>,
    /// Timestamp when the notification was created.
    pub created_at: Timestamp,
}

impl AssignmentNotification {
    /// Returns whether this notification is unread.
    #[inline]
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}
