//! Application state - shared across all handlers.

use std::sync::Arc;

use brandsite_core::ports::{AdminUserRepository, PostRepository};
use brandsite_infra::{InMemoryAdminUserRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use brandsite_infra::{PostgresAdminUserRepository, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub admins: Arc<dyn AdminUserRepository>,
    pub http: reqwest::Client,
    pub contact_relay_url: Option<String>,
}

type Repositories = (Arc<dyn PostRepository>, Arc<dyn AdminUserRepository>);

fn in_memory() -> Repositories {
    (
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemoryAdminUserRepository::new()),
    )
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (posts, admins): Repositories = {
            if let Some(db_config) = &config.database {
                match brandsite_infra::database::connect(db_config).await {
                    Ok(conn) => (
                        Arc::new(PostgresPostRepository::new(conn.clone())),
                        Arc::new(PostgresAdminUserRepository::new(conn)),
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        in_memory()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (posts, admins): Repositories = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            in_memory()
        };

        tracing::info!("Application state initialized");

        Self {
            posts,
            admins,
            http: reqwest::Client::new(),
            contact_relay_url: config.contact_relay_url.clone(),
        }
    }
}
