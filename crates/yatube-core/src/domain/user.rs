use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

const USERNAME_MAX_CHARS: usize = 150;

/// User entity - an account that can author posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamp.
    pub fn new(username: String, password_hash: String) -> Result<Self, DomainError> {
        Self::validate_username(&username)?;
        Ok(Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: Utc::now(),
        })
    }

    /// Usernames are 1..=150 characters of letters, digits and `@.+-_`.
    pub fn validate_username(username: &str) -> Result<(), DomainError> {
        let len = username.chars().count();
        if len == 0 || len > USERNAME_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "username must be 1 to {USERNAME_MAX_CHARS} characters"
            )));
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
        {
            return Err(DomainError::Validation(
                "username may only contain letters, digits and @/./+/-/_".to_string(),
            ));
        }
        Ok(())
    }
}
