use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AdminUser, Post, PostPatch};
use crate::error::RepoError;

/// Default number of related posts returned alongside a post detail.
pub const RELATED_POSTS_LIMIT: u64 = 3;

/// The single gateway to the blog post store. All blog reads and
/// writes, public and admin, go through this trait.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All published posts, newest first.
    async fn list_published(&self) -> Result<Vec<Post>, RepoError>;

    /// The unique published post with this slug. Unpublished posts are
    /// invisible to this lookup even when their slug matches.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Up to `limit` published posts sharing `category`, excluding
    /// `exclude_id`, newest first. An empty category yields an empty
    /// list rather than unrelated suggestions.
    async fn list_related(
        &self,
        category: &str,
        exclude_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Every post regardless of publication state, newest first.
    /// Admin-only; callers must hold an authenticated identity.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Look up a post by id, published or not. Admin-only.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Persist a freshly built post. A slug collision surfaces as
    /// [`RepoError::Constraint`]; the caller prompts for a manual slug.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Apply a partial update and refresh `updated_at`. Fails with
    /// [`RepoError::NotFound`] when the id does not exist.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError>;

    /// Flip only the publication flag. Refreshes `updated_at`.
    async fn set_published(&self, id: Uuid, value: bool) -> Result<Post, RepoError>;

    /// Permanent removal. Not idempotent: a second delete after success
    /// fails with [`RepoError::NotFound`] instead of being a no-op.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Admin account lookup used by the auth gate.
#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, RepoError>;

    async fn save(&self, user: AdminUser) -> Result<AdminUser, RepoError>;
}
