//! Application configuration loaded from environment variables.

use std::collections::HashSet;
use std::env;

use yatube_core::POSTS_PER_PAGE;
use yatube_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub posts_per_page: u64,
    /// Accounts granted the `admin` role, which may edit and delete groups.
    pub admin_usernames: HashSet<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            posts_per_page: parse_var("POSTS_PER_PAGE").unwrap_or(POSTS_PER_PAGE),
            admin_usernames: env::var("ADMIN_USERNAMES")
                .map(|raw| parse_usernames(&raw))
                .unwrap_or_default(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

/// Format: ADMIN_USERNAMES=alice,bob
fn parse_usernames(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_usernames_skips_blanks() {
        let admins = parse_usernames(" alice, ,bob,");
        assert_eq!(admins.len(), 2);
        assert!(admins.contains("alice"));
        assert!(admins.contains("bob"));
    }
}
