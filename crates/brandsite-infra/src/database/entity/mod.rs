//! SeaORM entities for the content store tables.

pub mod admin_user;
pub mod blog_post;
