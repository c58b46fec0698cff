use std::sync::Arc;

use uuid::Uuid;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::ports::UserRepository;

/// Account registration, lookup and removal.
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a user whose password has already been hashed.
    pub async fn register(&self, username: &str, password_hash: String) -> Result<User, DomainError> {
        let user = User::new(username.to_string(), password_hash)?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "username '{username}' is already taken"
            )));
        }

        let saved = self.users.insert(user).await?;
        tracing::info!(user_id = %saved.id, "User registered");
        Ok(saved)
    }

    pub async fn get(&self, username: &str) -> Result<User, DomainError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", id))
    }

    /// Delete an account together with every post it authored.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.users.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("user", id),
            other => other.into(),
        })?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
