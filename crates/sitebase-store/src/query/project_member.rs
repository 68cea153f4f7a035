//! Project member repository for managing project membership.

use std::future::Future;

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{NewProjectMember, ProjectMember, UpdateProjectMember};
use crate::types::{ConstraintViolation, MemberPosition, ProjectMemberConstraints};
use crate::{MemStore, StoreError, StoreResult, TRACING_TARGET_QUERY};

/// Repository for project member operations.
///
/// Handles project membership management including CRUD operations,
/// position-based lookups, and access checks. The access checks here are the
/// raw, policy-free lookups the authorization layer routes its relationship
/// predicates through.
pub trait ProjectMemberRepository {
    /// Adds a new member to a project.
    fn add_project_member(
        &self,
        member: NewProjectMember,
    ) -> impl Future<Output = StoreResult<ProjectMember>> + Send;

    /// Finds a project member by project and account ids.
    fn find_project_member(
        &self,
        project_id: Uuid,
        account_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<ProjectMember>>> + Send;

    /// Updates a project member with partial changes.
    fn update_project_member(
        &self,
        project_id: Uuid,
        account_id: Uuid,
        changes: UpdateProjectMember,
    ) -> impl Future<Output = StoreResult<ProjectMember>> + Send;

    /// Permanently removes a member from a project.
    fn remove_project_member(
        &self,
        project_id: Uuid,
        account_id: Uuid,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Lists members of a project ordered by position and creation time.
    fn list_project_members(
        &self,
        project_id: Uuid,
    ) -> impl Future<Output = StoreResult<Vec<ProjectMember>>> + Send;

    /// Gets a member's position for permission checking.
    ///
    /// Returns the position if the account is an active member, `None`
    /// otherwise.
    fn check_member_position(
        &self,
        project_id: Uuid,
        account_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<MemberPosition>>> + Send;

    /// Checks whether an account has any active membership in a project.
    fn check_project_access(
        &self,
        project_id: Uuid,
        account_id: Uuid,
    ) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Updates the last access timestamp for a member.
    fn touch_member_access(
        &self,
        project_id: Uuid,
        account_id: Uuid,
    ) -> impl Future<Output = StoreResult<()>> + Send;
}

impl ProjectMemberRepository for MemStore {
    async fn add_project_member(&self, member: NewProjectMember) -> StoreResult<ProjectMember> {
        let mut tables = self.write().await;

        let key = (member.project_id, member.account_id);
        if tables.project_members.contains_key(&key) {
            return Err(StoreError::Constraint(ConstraintViolation::ProjectMember(
                ProjectMemberConstraints::MemberPairUnique,
            )));
        }

        let now = Timestamp::now();
        let row = ProjectMember {
            project_id: member.project_id,
            account_id: member.account_id,
            position: member.position,
            is_active: true,
            last_accessed_at: None,
            created_by: member.created_by,
            created_at: now,
            updated_at: now,
        };
        tables.project_members.insert(key, row.clone());

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            project_id = %row.project_id,
            account_id = %row.account_id,
            position = %row.position,
            "Added project member"
        );

        Ok(row)
    }

    async fn find_project_member(
        &self,
        project_id: Uuid,
        account_id: Uuid,
    ) -> StoreResult<Option<ProjectMember>> {
        let tables = self.read().await;
        Ok(tables.project_members.get(&(project_id, account_id)).cloned())
    }

    async fn update_project_member(
        &self,
        project_id: Uuid,
        account_id: Uuid,
        changes: UpdateProjectMember,
    ) -> StoreResult<ProjectMember> {
        let mut tables = self.write().await;
        let row = tables
            .project_members
            .get_mut(&(project_id, account_id))
            .ok_or(StoreError::NotFound("project_members"))?;

        if let Some(position) = changes.position {
            row.position = position;
        }
        if let Some(is_active) = changes.is_active {
            row.is_active = is_active;
        }
        row.updated_at = Timestamp::now();

        Ok(row.clone())
    }

    async fn remove_project_member(&self, project_id: Uuid, account_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await;
        tables
            .project_members
            .remove(&(project_id, account_id))
            .ok_or(StoreError::NotFound("project_members"))?;
        Ok(())
    }

    async fn list_project_members(&self, project_id: Uuid) -> StoreResult<Vec<ProjectMember>> {
        let tables = self.read().await;
        let mut members: Vec<_> = tables
            .project_members
            .values()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect();
        members.sort_by_key(|m| (m.position as u8, m.created_at));
        Ok(members)
    }

    async fn check_member_position(
        &self,
        project_id: Uuid,
        account_id: Uuid,
    ) -> StoreResult<Option<MemberPosition>> {
        let tables = self.read().await;
        Ok(tables
            .project_members
            .get(&(project_id, account_id))
            .filter(|m| m.is_active)
            .map(|m| m.position))
    }

    async fn check_project_access(&self, project_id: Uuid, account_id: Uuid) -> StoreResult<bool> {
        let tables = self.read().await;
        Ok(tables
            .project_members
            .get(&(project_id, account_id))
            .is_some_and(|m| m.is_active))
    }

    async fn touch_member_access(&self, project_id: Uuid, account_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await;
        let row = tables
            .project_members
            .get_mut(&(project_id, account_id))
            .ok_or(StoreError::NotFound("project_members"))?;
        row.last_accessed_at = Some(Timestamp::now());
        Ok(())
    }
}
