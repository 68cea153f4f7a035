//! Document repository for uploaded-file metadata.

use std::future::Future;

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{Document, NewDocument, UpdateDocument};
use crate::{MemStore, StoreError, StoreResult};

/// Repository for document metadata operations.
///
/// These are raw table operations; whether a given principal may perform
/// them is decided by the authorization layer before it calls in here.
pub trait DocumentRepository {
    /// Creates a new document row.
    fn create_document(
        &self,
        document: NewDocument,
    ) -> impl Future<Output = StoreResult<Document>> + Send;

    /// Finds a document by id.
    fn find_document(
        &self,
        document_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<Document>>> + Send;

    /// Updates a document with partial changes.
    fn update_document(
        &self,
        document_id: Uuid,
        changes: UpdateDocument,
    ) -> impl Future<Output = StoreResult<Document>> + Send;

    /// Permanently removes a document row.
    fn delete_document(&self, document_id: Uuid) -> impl Future<Output = StoreResult<()>> + Send;

    /// Lists documents of a project ordered by creation time.
    fn list_project_documents(
        &self,
        project_id: Uuid,
    ) -> impl Future<Output = StoreResult<Vec<Document>>> + Send;
}

impl DocumentRepository for MemStore {
    async fn create_document(&self, document: NewDocument) -> StoreResult<Document> {
        let now = Timestamp::now();
        let row = Document {
            id: Uuid::now_v7(),
            project_id: document.project_id,
            title: document.title,
            storage_key: document.storage_key,
            origin_token: document.origin_token,
            created_by: document.created_by,
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.write().await;
        tables.documents.insert(row.id, row.clone());

        Ok(row)
    }

    async fn find_document(&self, document_id: Uuid) -> StoreResult<Option<Document>> {
        let tables = self.read().await;
        Ok(tables.documents.get(&document_id).cloned())
    }

    async fn update_document(
        &self,
        document_id: Uuid,
        changes: UpdateDocument,
    ) -> StoreResult<Document> {
        let mut tables = self.write().await;
        let row = tables
            .documents
            .get_mut(&document_id)
            .ok_or(StoreError::NotFound("documents"))?;

        if let Some(title) = changes.title {
            row.title = title;
        }
        if let Some(storage_key) = changes.storage_key {
            row.storage_key = storage_key;
        }
        row.updated_at = Timestamp::now();

        Ok(row.clone())
    }

    async fn delete_document(&self, document_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await;
        tables
            .documents
            .remove(&document_id)
            .ok_or(StoreError::NotFound("documents"))?;
        Ok(())
    }

    async fn list_project_documents(&self, project_id: Uuid) -> StoreResult<Vec<Document>> {
        let tables = self.read().await;
        let mut documents: Vec<_> = tables
            .documents
            .values()
            .filter(|d| d.project_id == project_id)
            .cloned()
            .collect();
        documents.sort_by_key(|d| d.created_at);
        Ok(documents)
    }
}
