//! Project repository for managing project rows.

use std::future::Future;

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{NewProject, Project};
use crate::{MemStore, StoreError, StoreResult};

/// Repository for project operations.
pub trait ProjectRepository {
    /// Creates a new project.
    fn create_project(
        &self,
        project: NewProject,
    ) -> impl Future<Output = StoreResult<Project>> + Send;

    /// Finds a project by id.
    fn find_project(
        &self,
        project_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<Project>>> + Send;

    /// Lists all projects ordered by creation time.
    fn list_projects(&self) -> impl Future<Output = StoreResult<Vec<Project>>> + Send;

    /// Permanently removes a project.
    fn delete_project(&self, project_id: Uuid) -> impl Future<Output = StoreResult<()>> + Send;
}

impl ProjectRepository for MemStore {
    async fn create_project(&self, project: NewProject) -> StoreResult<Project> {
        if project.name.trim().is_empty() {
            return Err(StoreError::InvalidInput("project name is empty".into()));
        }
        if project.reference.trim().is_empty() {
            return Err(StoreError::InvalidInput("project reference is empty".into()));
        }

        let now = Timestamp::now();
        let row = Project {
            id: Uuid::now_v7(),
            name: project.name,
            reference: project.reference,
            created_by: project.created_by,
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.write().await;
        tables.projects.insert(row.id, row.clone());

        Ok(row)
    }

    async fn find_project(&self, project_id: Uuid) -> StoreResult<Option<Project>> {
        let tables = self.read().await;
        Ok(tables.projects.get(&project_id).cloned())
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let tables = self.read().await;
        let mut projects: Vec<_> = tables.projects.values().cloned().collect();
        projects.sort_by_key(|p| p.created_at);
        Ok(projects)
    }

    async fn delete_project(&self, project_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await;
        tables
            .projects
            .remove(&project_id)
            .ok_or(StoreError::NotFound("projects"))?;

        // Project-scoped rows go with the project.
        tables.project_members.retain(|(pid, _), _| *pid != project_id);
        tables.tasks.retain(|_, t| t.project_id != project_id);
        tables.documents.retain(|_, d| d.project_id != project_id);
        tables.share_tokens.retain(|_, t| t.project_id != project_id);
        let live: std::collections::HashSet<Uuid> =
            tables.share_tokens.keys().copied().collect();
        tables.token_index.retain(|_, id| live.contains(id));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::query::ShareTokenRepository;
    use crate::types::TokenKind;

    use super::*;

    #[tokio::test]
    async fn test_blank_project_fields_rejected() {
        let store = MemStore::new();
        let err = store
            .create_project(NewProject {
                name: " ".to_owned(),
                reference: "RS-1".to_owned(),
                created_by: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_delete_project_cascades_scoped_rows() {
        let store = MemStore::new();
        let project = store
            .create_project(NewProject {
                name: "Quarry weighbridge".to_owned(),
                reference: "QW-3".to_owned(),
                created_by: Uuid::new_v4(),
            })
            .await
            .unwrap();
        let token = store
            .issue_share_token(crate::model::NewShareToken {
                kind: TokenKind::ClientPortal,
                project_id: project.id,
                token: None,
                allow_comments: None,
                expires_at: None,
                created_by: project.created_by,
            })
            .await
            .unwrap();

        store.delete_project(project.id).await.unwrap();

        assert!(store.find_project(project.id).await.unwrap().is_none());
        assert!(store.find_share_token(&token.token).await.unwrap().is_none());
    }
}
