//! Domain entities - the core business objects.

mod admin_user;
mod post;

pub mod slug;

pub use admin_user::AdminUser;
pub use post::{DEFAULT_AUTHOR, Post, PostDraft, PostPatch};
