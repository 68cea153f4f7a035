//! Task model for assignable project work items.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::TaskStatus;

/// Task row: a project-scoped work item with an assignable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: Uuid,
    /// Reference to the owning project.
    pub project_id: Uuid,
    /// Short task title.
    pub title: String,
    /// Current workflow status.
    pub status: TaskStatus,
    /// Account the task is assigned to, if any.
    pub assigned_to: Option<Uuid>,
    /// Optional due date.
    pub due_at: Option<Timestamp>,
    /// Account that created the task.
    pub created_by: Uuid,
    /// Account that last updated the task.
    pub updated_by: Uuid,
    /// Timestamp when the task was created.
    pub created_at: Timestamp,
    /// Timestamp when the task was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    /// Owning project ID.
    pub project_id: Uuid,
    /// Task title.
    pub title: String,
    /// Initial assignee, if any.
    pub assigned_to: Option<Uuid>,
    /// Due date.
    pub due_at: Option<Timestamp>,
    /// Creating account.
    pub created_by: Uuid,
}

/// Data for updating a task.
///
/// The assignee field is doubly optional: `None` leaves the assignee
/// untouched, `Some(None)` clears it, `Some(Some(id))` assigns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// Task title.
    pub title: Option<String>,
    /// Workflow status.
    pub status: Option<TaskStatus>,
    /// Assignee change, see the struct docs.
    pub assigned_to: Option<Option<Uuid>>,
    /// Due date.
    pub due_at: Option<Timestamp>,
    /// Updating account.
    pub updated_by: Uuid,
}

impl Task {
    /// Returns whether the task currently has an assignee.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }

    /// Returns whether the task is assigned to the given account.
    #[inline]
    pub fn is_assigned_to(&self, account_id: Uuid) -> bool {
        self.assigned_to == Some(account_id)
    }

    /// Returns whether the task is overdue.
    pub fn is_overdue(&self) -> bool {
        match self.due_at {
            Some(due_at) => self.status.is_open() && due_at < Timestamp::now(),
            None => false,
        }
    }
}
