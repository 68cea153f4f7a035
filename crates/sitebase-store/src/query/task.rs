//! Task repository with assignment-notification emission.

use std::future::Future;

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{AssignmentNotification, NewTask, Task, UpdateTask};
use crate::types::NotificationEvent;
use crate::{MemStore, StoreError, StoreResult, TRACING_TARGET_TRIGGER};

/// Repository for task operations.
///
/// Assignment notifications ride on the single task write path: a statement
/// that moves the assignee from unset-or-different to a new non-null account
/// emits exactly one notification addressed to that account, under the same
/// write guard as the task update. Unrelated field changes and same-value
/// re-assignments emit nothing.
pub trait TaskRepository {
    /// Creates a new task.
    ///
    /// A task created with an initial assignee notifies that assignee.
    fn create_task(&self, task: NewTask) -> impl Future<Output = StoreResult<Task>> + Send;

    /// Finds a task by id.
    fn find_task(&self, task_id: Uuid) -> impl Future<Output = StoreResult<Option<Task>>> + Send;

    /// Updates a task with partial changes.
    fn update_task(
        &self,
        task_id: Uuid,
        changes: UpdateTask,
    ) -> impl Future<Output = StoreResult<Task>> + Send;

    /// Assigns a task to an account, or clears the assignee.
    ///
    /// Convenience wrapper over [`TaskRepository::update_task`] carrying only
    /// the assignee change.
    fn assign_task(
        &self,
        task_id: Uuid,
        assignee: Option<Uuid>,
        assigned_by: Uuid,
    ) -> impl Future<Output = StoreResult<Task>> + Send;

    /// Lists tasks of a project ordered by creation time.
    fn list_project_tasks(
        &self,
        project_id: Uuid,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send;
}

impl TaskRepository for MemStore {
    async fn create_task(&self, task: NewTask) -> StoreResult<Task> {
        let now = Timestamp::now();
        let row = Task {
            id: Uuid::now_v7(),
            project_id: task.project_id,
            title: task.title,
            status: Default::default(),
            assigned_to: task.assigned_to,
            due_at: task.due_at,
            created_by: task.created_by,
            updated_by: task.created_by,
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.write().await;
        tables.tasks.insert(row.id, row.clone());
        if let Some(assignee) = row.assigned_to {
            emit_assignment(&mut tables, &row, assignee, NotificationEvent::TaskAssigned, now);
        }

        Ok(row)
    }

    async fn find_task(&self, task_id: Uuid) -> StoreResult<Option<Task>> {
        let tables = self.read().await;
        Ok(tables.tasks.get(&task_id).cloned())
    }

    async fn update_task(&self, task_id: Uuid, changes: UpdateTask) -> StoreResult<Task> {
        let mut tables = self.write().await;
        let row = tables
            .tasks
            .get_mut(&task_id)
            .ok_or(StoreError::NotFound("tasks"))?;

        // Capture the transition before applying it; the notification
        // decision depends on the previous assignee.
        let previous = row.assigned_to;

        if let Some(title) = changes.title {
            row.title = title;
        }
        if let Some(status) = changes.status {
            row.status = status;
        }
        if let Some(assignee) = changes.assigned_to {
            row.assigned_to = assignee;
        }
        if let Some(due_at) = changes.due_at {
            row.due_at = Some(due_at);
        }
        let now = Timestamp::now();
        row.updated_by = changes.updated_by;
        row.updated_at = now;

        let row = row.clone();
        if let Some(new_assignee) = row.assigned_to {
            if previous != Some(new_assignee) {
                let event = if previous.is_none() {
                    NotificationEvent::TaskAssigned
                } else {
                    NotificationEvent::TaskReassigned
                };
                emit_assignment(&mut tables, &row, new_assignee, event, now);
            }
        }

        Ok(row)
    }

    async fn assign_task(
        &self,
        task_id: Uuid,
        assignee: Option<Uuid>,
        assigned_by: Uuid,
    ) -> StoreResult<Task> {
        self.update_task(
            task_id,
            UpdateTask {
                assigned_to: Some(assignee),
                updated_by: assigned_by,
                ..Default::default()
            },
        )
        .await
    }

    async fn list_project_tasks(&self, project_id: Uuid) -> StoreResult<Vec<Task>> {
        let tables = self.read().await;
        let mut tasks: Vec<_> = tables
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }
}

/// Appends one notification addressed to the new assignee.
///
/// Called under the same write guard as the task mutation, once per
/// transition.
fn emit_assignment(
    tables: &mut crate::store::Tables,
    task: &Task,
    assignee: Uuid,
    event: NotificationEvent,
    now: Timestamp,
) {
    let notification = AssignmentNotification {
        id: Uuid::now_v7(),
        account_id: assignee,
        event,
        task_id: task.id,
        project_id: task.project_id,
        message: format!("You were assigned to \"{}\"", task.title),
        is_read: false,
        read_at: None,
        created_at: now,
    };

    tracing::debug!(
        target: TRACING_TARGET_TRIGGER,
        task_id = %task.id,
        account_id = %assignee,
        event = %event,
        "Emitted assignment notification"
    );

    tables.notifications.push(notification);
}
