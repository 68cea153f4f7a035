//! Cover template repository with single-default enforcement.

use std::future::Future;

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{CoverTemplate, NewCoverTemplate};
use crate::types::{ConstraintViolation, CoverTemplateConstraints, TemplateCategory};
use crate::{MemStore, StoreError, StoreResult, TRACING_TARGET_TRIGGER};

/// Repository for cover template operations.
///
/// The default flag is mutually exclusive per category: any write that flags
/// a template as default un-flags every competitor in the same category
/// under the same write guard, before the operation completes.
pub trait CoverTemplateRepository {
    /// Creates a new cover template.
    ///
    /// When the payload asks for the default flag, competing defaults in the
    /// category are cleared as part of the same write.
    fn create_cover_template(
        &self,
        template: NewCoverTemplate,
    ) -> impl Future<Output = StoreResult<CoverTemplate>> + Send;

    /// Finds a cover template by id.
    fn find_cover_template(
        &self,
        template_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<CoverTemplate>>> + Send;

    /// Makes a template the default of its category.
    ///
    /// Idempotent: re-applying to the current default leaves exactly one
    /// default in the category.
    fn set_default_template(
        &self,
        template_id: Uuid,
    ) -> impl Future<Output = StoreResult<CoverTemplate>> + Send;

    /// Finds the default template of a category, if one is flagged.
    fn find_default_template(
        &self,
        category: TemplateCategory,
    ) -> impl Future<Output = StoreResult<Option<CoverTemplate>>> + Send;

    /// Lists templates of a category ordered by creation time.
    fn list_templates(
        &self,
        category: TemplateCategory,
    ) -> impl Future<Output = StoreResult<Vec<CoverTemplate>>> + Send;

    /// Permanently removes a template.
    fn delete_cover_template(
        &self,
        template_id: Uuid,
    ) -> impl Future<Output = StoreResult<()>> + Send;
}

impl CoverTemplateRepository for MemStore {
    async fn create_cover_template(&self, template: NewCoverTemplate) -> StoreResult<CoverTemplate> {
        if template.name.trim().is_empty() {
            return Err(StoreError::Constraint(ConstraintViolation::CoverTemplate(
                CoverTemplateConstraints::NameLength,
            )));
        }

        let mut tables = self.write().await;

        let duplicate = tables
            .cover_templates
            .values()
            .any(|t| t.category == template.category && t.name == template.name);
        if duplicate {
            return Err(StoreError::Constraint(ConstraintViolation::CoverTemplate(
                CoverTemplateConstraints::NameUniquePerCategory,
            )));
        }

        let now = Timestamp::now();
        let is_default = template.is_default.unwrap_or(false);
        if is_default {
            clear_category_default(&mut tables, template.category, now);
        }

        let row = CoverTemplate {
            id: Uuid::now_v7(),
            category: template.category,
            name: template.name,
            is_default,
            layout: template
                .layout
                .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
            created_by: template.created_by,
            created_at: now,
            updated_at: now,
        };
        tables.cover_templates.insert(row.id, row.clone());

        Ok(row)
    }

    async fn find_cover_template(&self, template_id: Uuid) -> StoreResult<Option<CoverTemplate>> {
        let tables = self.read().await;
        Ok(tables.cover_templates.get(&template_id).cloned())
    }

    async fn set_default_template(&self, template_id: Uuid) -> StoreResult<CoverTemplate> {
        let mut tables = self.write().await;

        let category = tables
            .cover_templates
            .get(&template_id)
            .map(|t| t.category)
            .ok_or(StoreError::NotFound("cover_templates"))?;

        let now = Timestamp::now();
        let cleared = clear_category_default(&mut tables, category, now);

        let row = tables
            .cover_templates
            .get_mut(&template_id)
            .ok_or(StoreError::NotFound("cover_templates"))?;
        row.is_default = true;
        row.updated_at = now;

        tracing::debug!(
            target: TRACING_TARGET_TRIGGER,
            template_id = %template_id,
            category = %category,
            cleared,
            "Set default template"
        );

        Ok(row.clone())
    }

    async fn find_default_template(
        &self,
        category: TemplateCategory,
    ) -> StoreResult<Option<CoverTemplate>> {
        let tables = self.read().await;
        Ok(tables
            .cover_templates
            .values()
            .find(|t| t.category == category && t.is_default)
            .cloned())
    }

    async fn list_templates(&self, category: TemplateCategory) -> StoreResult<Vec<CoverTemplate>> {
        let tables = self.read().await;
        let mut templates: Vec<_> = tables
            .cover_templates
            .values()
            .filter(|t| t.category == category)
            .cloned()
            .collect();
        templates.sort_by_key(|t| t.created_at);
        Ok(templates)
    }

    async fn delete_cover_template(&self, template_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await;
        tables
            .cover_templates
            .remove(&template_id)
            .ok_or(StoreError::NotFound("cover_templates"))?;
        Ok(())
    }
}

/// Un-flags every default template in the category.
///
/// Must be called under the same write guard as the flagging write so the
/// invariant holds at every commit point. Returns how many rows were
/// un-flagged.
fn clear_category_default(
    tables: &mut crate::store::Tables,
    category: TemplateCategory,
    now: Timestamp,
) -> usize {
    let mut cleared = 0;
    for template in tables.cover_templates.values_mut() {
        if template.category == category && template.is_default {
            template.is_default = false;
            template.updated_at = now;
            cleared += 1;
        }
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_template(category: TemplateCategory, name: &str) -> NewCoverTemplate {
        NewCoverTemplate {
            category,
            name: name.to_owned(),
            layout: None,
            is_default: None,
            created_by: Uuid::new_v4(),
        }
    }

    async fn default_count(store: &MemStore, category: TemplateCategory) -> usize {
        store
            .list_templates(category)
            .await
            .unwrap()
            .iter()
            .filter(|t| t.is_default)
            .count()
    }

    #[tokio::test]
    async fn test_set_default_unflags_competitors() {
        let store = MemStore::new();
        let a = store
            .create_cover_template(new_template(TemplateCategory::Invoice, "Classic"))
            .await
            .unwrap();
        let b = store
            .create_cover_template(new_template(TemplateCategory::Invoice, "Modern"))
            .await
            .unwrap();

        store.set_default_template(a.id).await.unwrap();
        store.set_default_template(b.id).await.unwrap();

        assert_eq!(default_count(&store, TemplateCategory::Invoice).await, 1);
        let current = store
            .find_default_template(TemplateCategory::Invoice)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.id, b.id);
    }

    #[tokio::test]
    async fn test_set_default_is_idempotent() {
        let store = MemStore::new();
        let a = store
            .create_cover_template(new_template(TemplateCategory::CoverPage, "Standard"))
            .await
            .unwrap();

        store.set_default_template(a.id).await.unwrap();
        store.set_default_template(a.id).await.unwrap();

        assert_eq!(default_count(&store, TemplateCategory::CoverPage).await, 1);
    }

    #[tokio::test]
    async fn test_default_flag_is_scoped_per_category() {
        let store = MemStore::new();
        let invoice = store
            .create_cover_template(new_template(TemplateCategory::Invoice, "Classic"))
            .await
            .unwrap();
        let report = store
            .create_cover_template(new_template(TemplateCategory::Report, "Monthly"))
            .await
            .unwrap();

        store.set_default_template(invoice.id).await.unwrap();
        store.set_default_template(report.id).await.unwrap();

        assert_eq!(default_count(&store, TemplateCategory::Invoice).await, 1);
        assert_eq!(default_count(&store, TemplateCategory::Report).await, 1);
    }

    #[tokio::test]
    async fn test_create_as_default_clears_existing() {
        let store = MemStore::new();
        let a = store
            .create_cover_template(NewCoverTemplate {
                is_default: Some(true),
                ..new_template(TemplateCategory::FinalAccount, "First")
            })
            .await
            .unwrap();
        let b = store
            .create_cover_template(NewCoverTemplate {
                is_default: Some(true),
                ..new_template(TemplateCategory::FinalAccount, "Second")
            })
            .await
            .unwrap();

        assert_eq!(default_count(&store, TemplateCategory::FinalAccount).await, 1);
        let current = store
            .find_default_template(TemplateCategory::FinalAccount)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.id, b.id);
        assert_ne!(current.id, a.id);
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let store = MemStore::new();
        let err = store
            .create_cover_template(new_template(TemplateCategory::Report, "  "))
            .await
            .unwrap_err();
        assert_eq!(
            err.constraint_violation(),
            Some(&ConstraintViolation::CoverTemplate(
                CoverTemplateConstraints::NameLength
            ))
        );
    }
}
