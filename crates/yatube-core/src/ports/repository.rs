use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository. Deleting a user must delete all of their posts.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Group repository. Deleting a group must clear `group_id` on its posts.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Group>, RepoError>;

    /// All groups ordered by title.
    async fn list(&self) -> Result<Vec<Group>, RepoError>;
}

/// Which posts a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Group(Uuid),
    Author(Uuid),
}

/// Post repository. Listings are always newest `pub_date` first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError>;

    async fn find_slice(
        &self,
        filter: PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;
}
