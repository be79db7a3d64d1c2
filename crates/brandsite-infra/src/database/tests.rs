#[cfg(test)]
mod tests {
    use crate::database::entity::blog_post;
    use crate::database::postgres_repo::PostgresPostRepository;
    use brandsite_core::domain::Post;
    use brandsite_core::ports::PostRepository;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(title: &str, slug: &str, published: bool) -> blog_post::Model {
        let now = chrono::Utc::now();
        blog_post::Model {
            id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            slug: slug.to_owned(),
            excerpt: "Excerpt".to_owned(),
            content: "Content".to_owned(),
            author: "Nikita Vora".to_owned(),
            category: Some("Marketing".to_owned()),
            tags: serde_json::json!(["brand", "growth"]),
            featured_image: None,
            published,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_slug_maps_model_to_domain() {
        let expected = model("Test Post", "test-post", true);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![expected.clone()]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let post: Option<Post> = repo.find_by_slug("test-post").await.unwrap();

        let post = post.unwrap();
        assert_eq!(post.id, expected.id);
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.tags, vec!["brand", "growth"]);
    }

    #[tokio::test]
    async fn test_find_by_slug_no_match_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<blog_post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(repo.find_by_slug("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_published_maps_all_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                model("Newer", "newer", true),
                model("Older", "older", true),
            ]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts = repo.list_published().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "newer");
    }

    #[tokio::test]
    async fn test_list_related_empty_category_skips_query() {
        // No query results appended: touching the mock would error.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PostgresPostRepository::new(db);

        let related = repo.list_related("", uuid::Uuid::new_v4(), 3).await.unwrap();
        assert!(related.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let err = repo.delete(uuid::Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, brandsite_core::error::RepoError::NotFound));
    }
}
