use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::slug;
use crate::error::DomainError;

/// Byline used when a draft does not name an author.
pub const DEFAULT_AUTHOR: &str = "Nikita Vora";

/// Post entity - a single blog post.
///
/// `content` is stored and served verbatim; it is not sanitized here,
/// which is a known script-injection surface if authorship ever opens
/// up beyond the trusted admin accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a post. Everything except title, content, and
/// excerpt is optional; the slug is derived from the title when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub slug: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub published: bool,
}

/// Partial update for a post. `None` fields are left untouched.
///
/// `category` and `featured_image` use a nested `Option` so a patch can
/// distinguish "leave as is" (`None`) from "clear the field"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    #[serde(default, with = "serde_double_option")]
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    #[serde(default, with = "serde_double_option")]
    pub featured_image: Option<Option<String>>,
    pub published: Option<bool>,
}

impl Post {
    /// Build a new post from a draft.
    ///
    /// Fails with [`DomainError::Validation`] when title, content, or
    /// excerpt is empty. Derives the slug from the title unless the
    /// draft supplies one, fills in the default author, and timestamps
    /// the post with the current time.
    pub fn from_draft(draft: PostDraft) -> Result<Self, DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".into()));
        }
        if draft.content.trim().is_empty() {
            return Err(DomainError::Validation("content must not be empty".into()));
        }
        if draft.excerpt.trim().is_empty() {
            return Err(DomainError::Validation("excerpt must not be empty".into()));
        }

        // Manual slugs go through the same normalization as derived
        // ones so the stored slug is always URL-safe. Normalization is
        // a no-op for an already-clean slug.
        let slug = match draft.slug.as_deref().map(slug::derive) {
            Some(s) if !s.is_empty() => s,
            _ => slug::derive(&draft.title),
        };

        let now = Utc::now();
        let mut post = Self {
            id: Uuid::new_v4(),
            title: draft.title,
            slug,
            excerpt: draft.excerpt,
            content: draft.content,
            author: draft.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            category: draft.category.filter(|c| !c.is_empty()),
            tags: Vec::new(),
            featured_image: draft.featured_image,
            published: draft.published,
            created_at: now,
            updated_at: now,
        };
        for tag in draft.tags {
            post.add_tag(tag);
        }
        Ok(post)
    }

    /// Append a tag, ignoring duplicates and blank entries.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        let tag = tag.trim();
        if !tag.is_empty() && !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }

    /// Apply a partial update and refresh `updated_at`.
    ///
    /// A title change without an explicit slug in the patch re-derives
    /// the slug from the new title, mirroring the editor behavior.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            if patch.slug.is_none() && title != self.title {
                self.slug = slug::derive(&title);
            }
            self.title = title;
        }
        if let Some(slug) = patch.slug {
            let slug = slug::derive(&slug);
            // A manual slug that normalizes away entirely is ignored
            // rather than stored empty.
            if !slug.is_empty() {
                self.slug = slug;
            }
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(category) = patch.category {
            self.category = category.filter(|c| !c.is_empty());
        }
        if let Some(tags) = patch.tags {
            self.tags.clear();
            for tag in tags {
                self.add_tag(tag);
            }
        }
        if let Some(featured_image) = patch.featured_image {
            self.featured_image = featured_image;
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
        self.updated_at = Utc::now();
    }
}

/// Serde helper for `Option<Option<T>>` patch fields: an absent key
/// deserializes to `None`, an explicit `null` to `Some(None)`.
mod serde_double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            excerpt: "A short summary".to_string(),
            content: "<p>Long-form content</p>".to_string(),
            ..PostDraft::default()
        }
    }

    #[test]
    fn test_from_draft_derives_slug_and_defaults() {
        let post = Post::from_draft(draft("How to Grow Your Brand")).unwrap();

        assert_eq!(post.slug, "how-to-grow-your-brand");
        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert!(!post.published);
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_from_draft_keeps_supplied_slug() {
        let mut d = draft("Some Title");
        d.slug = Some("custom-slug".to_string());

        let post = Post::from_draft(d).unwrap();
        assert_eq!(post.slug, "custom-slug");
    }

    #[test]
    fn test_from_draft_normalizes_supplied_slug() {
        let mut d = draft("Some Title");
        d.slug = Some("  My Slug!  ".to_string());

        let post = Post::from_draft(d).unwrap();
        assert_eq!(post.slug, "my-slug");
    }

    #[test]
    fn test_from_draft_falls_back_when_supplied_slug_normalizes_away() {
        let mut d = draft("Some Title");
        d.slug = Some("???".to_string());

        let post = Post::from_draft(d).unwrap();
        assert_eq!(post.slug, "some-title");
    }

    #[test]
    fn test_from_draft_rejects_empty_required_fields() {
        for field in ["title", "content", "excerpt"] {
            let mut d = draft("Title");
            match field {
                "title" => d.title = "   ".to_string(),
                "content" => d.content = String::new(),
                _ => d.excerpt = String::new(),
            }
            let err = Post::from_draft(d).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{field}");
        }
    }

    #[test]
    fn test_tags_deduplicated_on_addition() {
        let mut d = draft("Tagged");
        d.tags = vec![
            "marketing".to_string(),
            "marketing".to_string(),
            " growth ".to_string(),
            String::new(),
        ];

        let post = Post::from_draft(d).unwrap();
        assert_eq!(post.tags, vec!["marketing", "growth"]);
    }

    #[test]
    fn test_apply_title_change_rederives_slug() {
        let mut post = Post::from_draft(draft("Old Title")).unwrap();
        post.apply(PostPatch {
            title: Some("Fresh New Title".to_string()),
            ..PostPatch::default()
        });

        assert_eq!(post.slug, "fresh-new-title");
    }

    #[test]
    fn test_apply_explicit_slug_wins_over_derivation() {
        let mut post = Post::from_draft(draft("Old Title")).unwrap();
        post.apply(PostPatch {
            title: Some("New Title".to_string()),
            slug: Some("hand-picked".to_string()),
            ..PostPatch::default()
        });

        assert_eq!(post.slug, "hand-picked");
    }

    #[test]
    fn test_apply_normalizes_explicit_slug() {
        let mut post = Post::from_draft(draft("Old Title")).unwrap();
        post.apply(PostPatch {
            slug: Some(" Hand Picked ".to_string()),
            ..PostPatch::default()
        });

        assert_eq!(post.slug, "hand-picked");
    }

    #[test]
    fn test_apply_refreshes_updated_at() {
        let mut post = Post::from_draft(draft("Title")).unwrap();
        let before = post.updated_at;

        post.apply(PostPatch {
            published: Some(true),
            ..PostPatch::default()
        });

        assert!(post.published);
        assert!(post.updated_at > before);
        assert!(post.updated_at >= post.created_at);
    }

    #[test]
    fn test_apply_can_clear_category() {
        let mut d = draft("Title");
        d.category = Some("Digital Marketing".to_string());
        let mut post = Post::from_draft(d).unwrap();

        post.apply(PostPatch {
            category: Some(None),
            ..PostPatch::default()
        });
        assert_eq!(post.category, None);
    }
}
