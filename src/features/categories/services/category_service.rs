use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::stores::CategoryStore;

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    /// List all categories in creation order (flat list)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.store.list().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Create a category.
    ///
    /// Blank names are skipped without an error: nothing is created and
    /// `None` is returned so the caller can tell the admin nothing happened.
    pub async fn create(&self, name: &str) -> Result<Option<CategoryResponseDto>> {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("Skipping category creation: empty name");
            return Ok(None);
        }

        let category = self.store.insert(name).await?;
        tracing::info!("Category created: id={}, name={}", category.id, category.name);

        Ok(Some(category.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryCategoryStore;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(InMemoryCategoryStore::default()))
    }

    #[tokio::test]
    async fn create_with_empty_name_is_a_no_op() {
        let service = service();

        assert!(service.create("").await.unwrap().is_none());
        assert!(service.create("   ").await.unwrap().is_none());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn created_category_shows_up_in_list() {
        let service = service();

        let created = service.create("Hardware").await.unwrap().unwrap();
        assert_eq!(created.name, "Hardware");

        let categories = service.list().await.unwrap();
        assert!(categories.iter().any(|c| c.name == "Hardware"));
    }

    #[tokio::test]
    async fn duplicate_names_are_allowed() {
        let service = service();

        service.create("Hardware").await.unwrap();
        service.create("Hardware").await.unwrap();

        let categories = service.list().await.unwrap();
        assert_eq!(categories.len(), 2);
    }

    #[tokio::test]
    async fn list_preserves_creation_order() {
        let service = service();

        service.create("Hardware").await.unwrap();
        service.create("Software").await.unwrap();
        service.create("Network").await.unwrap();

        let names: Vec<_> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Hardware", "Software", "Network"]);
    }
}
