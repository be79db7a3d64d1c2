//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use brandsite_core::domain::{AdminUser, Post, PostPatch};
use brandsite_core::error::RepoError;
use brandsite_core::ports::{AdminUserRepository, PostRepository};

use super::entity::admin_user::{self, Entity as AdminUserEntity};
use super::entity::blog_post::{self, Entity as BlogPostEntity};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

/// PostgreSQL admin user repository.
pub struct PostgresAdminUserRepository {
    db: DbConn,
}

impl PostgresAdminUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> RepoError {
    if matches!(e, DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) {
        return RepoError::Connection(e.to_string());
    }

    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("slug already in use".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let models = BlogPostEntity::find()
            .filter(blog_post::Column::Published.eq(true))
            .order_by_desc(blog_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let model = BlogPostEntity::find()
            .filter(blog_post::Column::Slug.eq(slug))
            .filter(blog_post::Column::Published.eq(true))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Into::into))
    }

    async fn list_related(
        &self,
        category: &str,
        exclude_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        // An uncategorized post has no related posts; matching on an
        // empty category would suggest arbitrary unrelated content.
        if category.is_empty() {
            return Ok(Vec::new());
        }

        let models = BlogPostEntity::find()
            .filter(blog_post::Column::Published.eq(true))
            .filter(blog_post::Column::Category.eq(category))
            .filter(blog_post::Column::Id.ne(exclude_id))
            .order_by_desc(blog_post::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let models = BlogPostEntity::find()
            .order_by_desc(blog_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let model = BlogPostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Into::into))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let active: blog_post::ActiveModel = post.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError> {
        let model = BlogPostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut post: Post = model.into();
        post.apply(patch);

        let active: blog_post::ActiveModel = post.into();
        let model = active.update(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn set_published(&self, id: Uuid, value: bool) -> Result<Post, RepoError> {
        self.update(
            id,
            PostPatch {
                published: Some(value),
                ..PostPatch::default()
            },
        )
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = BlogPostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl AdminUserRepository for PostgresAdminUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, RepoError> {
        let model = AdminUserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, RepoError> {
        let model = AdminUserEntity::find()
            .filter(admin_user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Into::into))
    }

    async fn save(&self, user: AdminUser) -> Result<AdminUser, RepoError> {
        let active: admin_user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }
}
