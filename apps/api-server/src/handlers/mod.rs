//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod blog;
mod contact;
mod health;

use actix_web::web;

use brandsite_core::domain::Post;
use brandsite_shared::dto::PostResponse;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/contact", web::post().to(contact::submit))
            .service(
                web::scope("/blog")
                    .route("/posts", web::get().to(blog::list_posts))
                    .route("/posts/{slug}", web::get().to(blog::get_post))
                    .route("/posts/{slug}/related", web::get().to(blog::related_posts)),
            )
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            )
            // Admin routes - every handler extracts an Identity first
            .service(
                web::scope("/admin")
                    .route("/posts", web::get().to(admin::list_posts))
                    .route("/posts", web::post().to(admin::create_post))
                    .route("/posts/{id}", web::get().to(admin::get_post))
                    .route("/posts/{id}", web::put().to(admin::update_post))
                    .route("/posts/{id}/published", web::put().to(admin::set_published))
                    .route("/posts/{id}", web::delete().to(admin::delete_post)),
            ),
    );
}

/// Map a domain post onto the API response shape.
// Free function rather than From: both types live in other crates.
pub(crate) fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        slug: post.slug,
        excerpt: post.excerpt,
        content: post.content,
        author: post.author,
        category: post.category,
        tags: post.tags,
        featured_image: post.featured_image,
        published: post.published,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}
