//! Admin handlers - the CRUD surface behind the auth gate. Every
//! handler extracts [`Identity`] before the repository is touched.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use brandsite_core::domain::{Post, PostDraft, PostPatch};

use crate::handlers::post_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/admin/posts - every post, drafts included, newest first.
pub async fn list_posts(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;

    Ok(HttpResponse::Ok().json(
        posts.into_iter().map(post_response).collect::<Vec<_>>(),
    ))
}

/// GET /api/admin/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    _identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no post with id {id}")))?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/admin/posts
///
/// Validates the draft and derives the slug before the store is
/// touched. A slug collision comes back as 409; the editor then asks
/// for a manual slug.
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let post = Post::from_draft(body.into_inner())?;
    let saved = state.posts.insert(post).await?;

    tracing::info!(admin = %identity.email, post = %saved.id, slug = %saved.slug, "Post created");

    Ok(HttpResponse::Created().json(post_response(saved)))
}

/// PUT /api/admin/posts/{id} - partial update, refreshes `updated_at`.
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
    body: web::Json<PostPatch>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let updated = state.posts.update(id, body.into_inner()).await?;

    tracing::info!(admin = %identity.email, post = %id, "Post updated");

    Ok(HttpResponse::Ok().json(post_response(updated)))
}

#[derive(Debug, Deserialize)]
pub struct SetPublishedRequest {
    pub published: bool,
}

/// PUT /api/admin/posts/{id}/published - publish/unpublish toggle.
pub async fn set_published(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
    body: web::Json<SetPublishedRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let updated = state.posts.set_published(id, body.published).await?;

    tracing::info!(
        admin = %identity.email,
        post = %id,
        published = updated.published,
        "Post publication toggled"
    );

    Ok(HttpResponse::Ok().json(post_response(updated)))
}

/// DELETE /api/admin/posts/{id}
///
/// Permanent, no soft-delete. Deleting an already-deleted post is a
/// 404, not a no-op; the confirmation prompt lives client-side.
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state.posts.delete(id).await?;

    tracing::info!(admin = %identity.email, post = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
