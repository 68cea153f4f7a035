//! In-memory transactional store handle.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::model::{
    AssignmentNotification, CoverTemplate, Document, Project, ProjectMember, RoleAssignment,
    ShareToken, Task,
};
use crate::types::AppRole;

/// Cloneable handle over the in-memory table set.
///
/// Repositories implemented on this handle acquire one guard per operation:
/// a read guard for lookups, a write guard for mutations. The write guard is
/// the transaction boundary: multi-row invariants (the single-default flag,
/// notification emission) are applied under the same guard as the triggering
/// write, so concurrent writers serialize the way rows would under engine
/// row-locking.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    tables: Arc<RwLock<Tables>>,
}

/// The full table set backing the store.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    /// Projects by id.
    pub(crate) projects: HashMap<Uuid, Project>,
    /// Memberships by (project, account) pair.
    pub(crate) project_members: HashMap<(Uuid, Uuid), ProjectMember>,
    /// Global role grants by (account, role) pair.
    pub(crate) role_assignments: HashMap<(Uuid, AppRole), RoleAssignment>,
    /// Share tokens by record id.
    pub(crate) share_tokens: HashMap<Uuid, ShareToken>,
    /// Bearer-string index over `share_tokens`.
    pub(crate) token_index: HashMap<String, Uuid>,
    /// Cover templates by id.
    pub(crate) cover_templates: HashMap<Uuid, CoverTemplate>,
    /// Tasks by id.
    pub(crate) tasks: HashMap<Uuid, Task>,
    /// Emitted notification records, in emission order.
    pub(crate) notifications: Vec<AssignmentNotification>,
    /// Documents by id.
    pub(crate) documents: HashMap<Uuid, Document>,
}

impl MemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires a shared read guard over the table set.
    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    /// Acquires the exclusive write guard over the table set.
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
