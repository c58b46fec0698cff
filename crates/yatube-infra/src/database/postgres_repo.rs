//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use yatube_core::domain::{Group, Post, User};
use yatube_core::error::RepoError;
use yatube_core::ports::{GroupRepository, PostFilter, PostRepository, UserRepository};

use super::entity::group::{self, Entity as GroupEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL group repository.
pub type PostgresGroupRepository = PostgresBaseRepository<GroupEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        tracing::debug!(group_slug = %slug, "Finding group by slug");

        let result = GroupEntity::find()
            .filter(group::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Group>, RepoError> {
        let result = GroupEntity::find()
            .filter(group::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list(&self) -> Result<Vec<Group>, RepoError> {
        let result = GroupEntity::find()
            .order_by_asc(group::Column::Title)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

fn filtered(filter: PostFilter) -> Select<PostEntity> {
    let query = PostEntity::find();
    match filter {
        PostFilter::All => query,
        PostFilter::Group(id) => query.filter(post::Column::GroupId.eq(id)),
        PostFilter::Author(id) => query.filter(post::Column::AuthorId.eq(id)),
    }
}

/// Newest first; the id breaks ties between posts published in the same instant.
pub(crate) fn slice_query(filter: PostFilter, offset: u64, limit: u64) -> Select<PostEntity> {
    filtered(filter)
        .order_by_desc(post::Column::PubDate)
        .order_by_desc(post::Column::Id)
        .offset(offset)
        .limit(limit)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError> {
        filtered(filter).count(&self.db).await.map_err(map_db_err)
    }

    async fn find_slice(
        &self,
        filter: PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?filter, offset, limit, "Loading post slice");

        let result = slice_query(filter, offset, limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
