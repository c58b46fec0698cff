//! Application state - shared across all handlers.

use std::collections::HashSet;
use std::sync::Arc;

use yatube_core::ports::{GroupRepository, PostRepository, UserRepository};
use yatube_core::services::{GroupService, PostService, UserService};
use yatube_infra::MemoryStore;

#[cfg(feature = "postgres")]
use yatube_infra::database::{
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository, connect,
};

use crate::config::AppConfig;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub groups: Arc<GroupService>,
    pub posts: Arc<PostService>,
    admin_usernames: Arc<HashSet<String>>,
}

impl AppState {
    /// Build the application state with the configured storage backend.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match connect(db_config).await {
                Ok(conn) => {
                    tracing::info!("Application state initialized (postgres)");
                    return Self::from_repositories(
                        Arc::new(PostgresUserRepository::new(conn.clone())),
                        Arc::new(PostgresGroupRepository::new(conn.clone())),
                        Arc::new(PostgresPostRepository::new(conn)),
                        config,
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory store");

        Self::in_memory(config)
    }

    /// State backed by a fresh [`MemoryStore`].
    pub fn in_memory(config: &AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::from_repositories(store.clone(), store.clone(), store, config)
    }

    pub fn from_repositories(
        users: Arc<dyn UserRepository>,
        groups: Arc<dyn GroupRepository>,
        posts: Arc<dyn PostRepository>,
        config: &AppConfig,
    ) -> Self {
        Self {
            users: Arc::new(UserService::new(users.clone())),
            groups: Arc::new(GroupService::new(groups.clone())),
            posts: Arc::new(
                PostService::new(posts, groups, users).with_page_size(config.posts_per_page),
            ),
            admin_usernames: Arc::new(config.admin_usernames.clone()),
        }
    }

    /// Roles embedded in the access token issued to `username`.
    pub fn roles_for(&self, username: &str) -> Vec<String> {
        let mut roles = vec![ROLE_USER.to_string()];
        if self.admin_usernames.contains(username) {
            roles.push(ROLE_ADMIN.to_string());
        }
        roles
    }
}
