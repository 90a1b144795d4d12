//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use folio_core::domain::{Category, NewCategory, NewPost, Page, PageRequest, Post};
use folio_core::error::RepoError;
use folio_core::ports::{CategoryRepository, PostRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let now = Utc::now();
        let model = post::ActiveModel {
            id: NotSet,
            title: Set(new_post.title),
            content: Set(new_post.content),
            image: Set(new_post.image),
            category_id: Set(new_post.category_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Inserted post");
        Ok(model.into())
    }

    async fn update(&self, mut entity: Post) -> Result<Post, RepoError> {
        entity.updated_at = Utc::now();
        let id = entity.id;

        let mut active: post::ActiveModel = entity.into();
        active.id = Unchanged(id);
        active.created_at = NotSet;

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn list_page(&self, page: PageRequest) -> Result<Page<Post>, RepoError> {
        let paginator = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .paginate(&self.db, page.per_page);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let items = paginator
            .fetch_page(page.index())
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            items.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }

    async fn count_by_image(&self, image: &str) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::Image.eq(image))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn count_by_category(&self, category_id: i64) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category, RepoError> {
        let now = Utc::now();
        let model = category::ActiveModel {
            id: NotSet,
            name: Set(new_category.name),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, mut entity: Category) -> Result<Category, RepoError> {
        entity.updated_at = Utc::now();
        let id = entity.id;

        let mut active: category::ActiveModel = entity.into();
        active.id = Unchanged(id);
        active.created_at = NotSet;

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn list_all(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_page(&self, page: PageRequest) -> Result<Page<Category>, RepoError> {
        let paginator = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .order_by_asc(category::Column::Id)
            .paginate(&self.db, page.per_page);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let items = paginator
            .fetch_page(page.index())
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            items.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }
}
