//! In-memory repositories - used when no database is configured, and
//! as the reference implementation of the repository contract in tests.
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use brandsite_core::domain::{AdminUser, Post, PostPatch};
use brandsite_core::error::RepoError;
use brandsite_core::ports::{AdminUserRepository, PostRepository};

/// In-memory post repository backed by a HashMap behind an async RwLock.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(Self::newest_first(
            posts.values().filter(|p| p.published).cloned().collect(),
        ))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts
            .values()
            .find(|p| p.published && p.slug == slug)
            .cloned())
    }

    async fn list_related(
        &self,
        category: &str,
        exclude_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        if category.is_empty() {
            return Ok(Vec::new());
        }

        let posts = self.posts.read().await;
        let related = posts
            .values()
            .filter(|p| {
                p.published && p.id != exclude_id && p.category.as_deref() == Some(category)
            })
            .cloned()
            .collect();

        Ok(Self::newest_first(related)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(Self::newest_first(posts.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        // Same uniqueness the store's index enforces.
        if posts.values().any(|p| p.slug == post.slug) {
            return Err(RepoError::Constraint("slug already in use".to_string()));
        }

        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        // Apply to a copy first: the patch decides the final slug (an
        // explicit slug, or one re-derived from a changed title), and
        // the uniqueness check has to run against that result.
        let mut updated = posts.get(&id).ok_or(RepoError::NotFound)?.clone();
        updated.apply(patch);

        if posts
            .values()
            .any(|p| p.id != id && p.slug == updated.slug)
        {
            return Err(RepoError::Constraint("slug already in use".to_string()));
        }

        posts.insert(id, updated.clone());
        Ok(updated)
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
        let mut posts = self.posts.write().await;
        posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

/// In-memory admin user repository.
pub struct InMemoryAdminUserRepository {
    users: RwLock<HashMap<Uuid, AdminUser>>,
}

impl InMemoryAdminUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryAdminUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdminUserRepository for InMemoryAdminUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, RepoError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: AdminUser) -> Result<AdminUser, RepoError> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandsite_core::domain::PostDraft;

    async fn seed(repo: &InMemoryPostRepository, title: &str, published: bool) -> Post {
        seed_in_category(repo, title, published, None).await
    }

    async fn seed_in_category(
        repo: &InMemoryPostRepository,
        title: &str,
        published: bool,
        category: Option<&str>,
    ) -> Post {
        let post = Post::from_draft(PostDraft {
            title: title.to_string(),
            excerpt: format!("{title} excerpt"),
            content: format!("{title} content"),
            category: category.map(String::from),
            published,
            ..PostDraft::default()
        })
        .unwrap();
        repo.insert(post).await.unwrap()
    }

    #[tokio::test]
    async fn test_list_published_excludes_drafts() {
        let repo = InMemoryPostRepository::new();
        seed(&repo, "Published One", true).await;
        seed(&repo, "Draft One", false).await;
        seed(&repo, "Published Two", true).await;

        let listed = repo.list_published().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|p| p.published));
    }

    #[tokio::test]
    async fn test_list_published_newest_first() {
        let repo = InMemoryPostRepository::new();
        let older = seed(&repo, "Older", true).await;
        let newer = seed(&repo, "Newer", true).await;
        assert!(newer.created_at > older.created_at);

        let listed = repo.list_published().await.unwrap();
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }

    #[tokio::test]
    async fn test_find_by_slug_hides_unpublished() {
        let repo = InMemoryPostRepository::new();
        let draft = seed(&repo, "Hidden Draft", false).await;

        assert!(repo.find_by_slug(&draft.slug).await.unwrap().is_none());

        repo.set_published(draft.id, true).await.unwrap();
        let found = repo.find_by_slug(&draft.slug).await.unwrap().unwrap();
        assert_eq!(found.id, draft.id);
    }

    #[tokio::test]
    async fn test_list_related_empty_category_returns_nothing() {
        let repo = InMemoryPostRepository::new();
        seed_in_category(&repo, "A Post", true, Some("Leadership")).await;

        let related = repo.list_related("", Uuid::new_v4(), 3).await.unwrap();
        assert!(related.is_empty());
    }

    #[tokio::test]
    async fn test_list_related_excludes_self_and_respects_limit() {
        let repo = InMemoryPostRepository::new();
        let current = seed_in_category(&repo, "Current", true, Some("Marketing")).await;
        for i in 0..5 {
            seed_in_category(&repo, &format!("Sibling {i}"), true, Some("Marketing")).await;
        }
        seed_in_category(&repo, "Other Topic", true, Some("Leadership")).await;
        seed_in_category(&repo, "Unpublished Sibling", false, Some("Marketing")).await;

        let related = repo.list_related("Marketing", current.id, 3).await.unwrap();

        assert_eq!(related.len(), 3);
        assert!(related.iter().all(|p| p.id != current.id));
        assert!(related.iter().all(|p| p.published));
        assert!(related.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_set_published_reflected_by_get_and_bumps_updated_at() {
        let repo = InMemoryPostRepository::new();
        let post = seed(&repo, "Toggle Me", false).await;
        let before = post.updated_at;

        repo.set_published(post.id, true).await.unwrap();

        let fetched = repo.find_by_id(post.id).await.unwrap().unwrap();
        assert!(fetched.published);
        assert!(fetched.updated_at > before);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_slug() {
        let repo = InMemoryPostRepository::new();
        seed(&repo, "Same Title", true).await;

        let duplicate = Post::from_draft(PostDraft {
            title: "Same Title".to_string(),
            excerpt: "x".to_string(),
            content: "x".to_string(),
            ..PostDraft::default()
        })
        .unwrap();

        let err = repo.insert(duplicate).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_title_change_colliding_on_derived_slug() {
        let repo = InMemoryPostRepository::new();
        seed(&repo, "Hello", true).await;
        let other = seed(&repo, "Other", true).await;

        // Title-only patch: the slug re-derived from the new title
        // must hit the same uniqueness wall an explicit slug would.
        let err = repo
            .update(
                other.id,
                PostPatch {
                    title: Some("Hello".to_string()),
                    ..PostPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));

        let unchanged = repo.find_by_id(other.id).await.unwrap().unwrap();
        assert_eq!(unchanged.slug, "other");
    }

    #[tokio::test]
    async fn test_update_rejects_explicit_duplicate_slug() {
        let repo = InMemoryPostRepository::new();
        seed(&repo, "Hello", true).await;
        let other = seed(&repo, "Other", true).await;

        let err = repo
            .update(
                other.id,
                PostPatch {
                    slug: Some("hello".to_string()),
                    ..PostPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let err = repo
            .update(Uuid::new_v4(), PostPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_second_delete_fails() {
        let repo = InMemoryPostRepository::new();
        let post = seed(&repo, "Doomed", true).await;

        repo.delete(post.id).await.unwrap();
        let err = repo.delete(post.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }
}
