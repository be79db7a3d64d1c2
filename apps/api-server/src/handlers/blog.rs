//! Public blog handlers - read-only views over the published posts.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use brandsite_core::domain::Post;
use brandsite_core::ports::RELATED_POSTS_LIMIT;
use brandsite_shared::dto::PostListResponse;

use crate::handlers::post_response;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Free-text search over title, excerpt, and content.
    pub q: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
}

/// GET /api/blog/posts?q=&category=
///
/// Fetches the full published list and filters it in memory. Fine at
/// this corpus size; a larger corpus would need store-side search.
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_published().await?;

    let categories = distinct_categories(&posts);

    let query = query.into_inner();
    let search = query.q.unwrap_or_default();
    let category = query.category.unwrap_or_default();

    let filtered = posts
        .into_iter()
        .filter(|p| matches_search(p, &search) && matches_category(p, &category))
        .map(post_response)
        .collect();

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: filtered,
        categories,
    }))
}

/// GET /api/blog/posts/{slug}
///
/// 404 for unknown slugs and for unpublished posts alike.
pub async fn get_post(state: web::Data<AppState>, slug: web::Path<String>) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no published post with slug '{slug}'")))?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /api/blog/posts/{slug}/related
///
/// Up to three published posts in the same category, excluding the
/// post itself. Uncategorized posts get an empty list.
pub async fn related_posts(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no published post with slug '{slug}'")))?;

    let related = state
        .posts
        .list_related(
            post.category.as_deref().unwrap_or_default(),
            post.id,
            RELATED_POSTS_LIMIT,
        )
        .await?;

    Ok(HttpResponse::Ok().json(
        related.into_iter().map(post_response).collect::<Vec<_>>(),
    ))
}

/// Case-insensitive substring match against title, excerpt, and
/// content. An empty query matches everything.
fn matches_search(post: &Post, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    post.title.to_lowercase().contains(&query)
        || post.excerpt.to_lowercase().contains(&query)
        || post.content.to_lowercase().contains(&query)
}

/// Exact category equality; an empty selection matches everything.
fn matches_category(post: &Post, category: &str) -> bool {
    category.is_empty() || post.category.as_deref() == Some(category)
}

/// Distinct categories in listing order, for the filter dropdown.
fn distinct_categories(posts: &[Post]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for post in posts {
        if let Some(category) = &post.category
            && !categories.contains(category)
        {
            categories.push(category.clone());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandsite_core::domain::{Post, PostDraft};

    fn post(title: &str, excerpt: &str, content: &str, category: Option<&str>) -> Post {
        Post::from_draft(PostDraft {
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            content: content.to_string(),
            category: category.map(String::from),
            published: true,
            ..PostDraft::default()
        })
        .unwrap()
    }

    #[test]
    fn test_search_matches_title_case_insensitively() {
        let p = post("How to Grow Your Brand", "excerpt", "content", None);
        assert!(matches_search(&p, "grow"));
        assert!(matches_search(&p, "GROW"));
    }

    #[test]
    fn test_search_matches_excerpt_and_content() {
        let p = post("Title", "strategies for founders", "deep dive text", None);
        assert!(matches_search(&p, "founders"));
        assert!(matches_search(&p, "deep dive"));
        assert!(!matches_search(&p, "grow"));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let p = post("Anything", "excerpt", "content", None);
        assert!(matches_search(&p, ""));
    }

    #[test]
    fn test_category_filter_is_exact() {
        let p = post("Title", "excerpt", "content", Some("Digital Marketing"));
        assert!(matches_category(&p, "Digital Marketing"));
        assert!(!matches_category(&p, "Digital"));
        assert!(matches_category(&p, ""));
    }

    #[test]
    fn test_uncategorized_post_only_matches_empty_selection() {
        let p = post("Title", "excerpt", "content", None);
        assert!(matches_category(&p, ""));
        assert!(!matches_category(&p, "Leadership"));
    }

    #[test]
    fn test_distinct_categories_preserve_order_without_duplicates() {
        let posts = vec![
            post("A", "e", "c", Some("Marketing")),
            post("B", "e", "c", None),
            post("C", "e", "c", Some("Leadership")),
            post("D", "e", "c", Some("Marketing")),
        ];

        assert_eq!(distinct_categories(&posts), vec!["Marketing", "Leadership"]);
    }
}
