//! Category CRUD with name validation and a guard against orphaning posts.

use std::sync::Arc;

use crate::domain::{Category, NewCategory, Page, PageRequest};
use crate::error::{DomainError, RepoError};
use crate::ports::{CategoryRepository, PostRepository};

#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { categories, posts }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.list_all().await?)
    }

    pub async fn list_categories_page(
        &self,
        page: PageRequest,
    ) -> Result<Page<Category>, DomainError> {
        let page = PageRequest::new(page.page, page.per_page);
        Ok(self.categories.list_page(page).await?)
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, DomainError> {
        let new_category = NewCategory::new(name);
        new_category.validate_fields()?;
        let category = self.categories.create(new_category).await?;
        tracing::info!(category_id = category.id, "Category created");
        Ok(category)
    }

    pub async fn update_category(&self, id: i64, name: &str) -> Result<Category, DomainError> {
        let renamed = NewCategory::new(name);
        renamed.validate_fields()?;
        let mut category = self.get_category(id).await?;
        category.name = renamed.name;
        let category = self.categories.update(category).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Category", id),
            other => other.into(),
        })?;
        tracing::info!(category_id = id, "Category updated");
        Ok(category)
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), DomainError> {
        self.get_category(id).await?;

        let posts = self.posts.count_by_category(id).await?;
        if posts > 0 {
            return Err(DomainError::Conflict(format!(
                "Category {id} is still used by {posts} post(s)"
            )));
        }

        self.categories.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Category", id),
            other => other.into(),
        })?;
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }
}
