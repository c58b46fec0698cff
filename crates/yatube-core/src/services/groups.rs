use std::sync::Arc;

use crate::domain::{Group, GroupChanges, NewGroup};
use crate::error::{DomainError, RepoError};
use crate::ports::GroupRepository;

/// Group lifecycle: create, edit title/description, delete.
pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    /// Create a group. Fails with `Duplicate` when the slug is taken.
    pub async fn create(&self, input: NewGroup) -> Result<Group, DomainError> {
        let group = Group::new(input)?;

        if self.groups.find_by_slug(group.slug()).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "group slug '{}' is already taken",
                group.slug()
            )));
        }

        let saved = self.groups.insert(group).await?;
        tracing::info!(group_slug = %saved.slug(), "Group created");
        Ok(saved)
    }

    pub async fn get(&self, slug: &str) -> Result<Group, DomainError> {
        self.groups
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("group", slug))
    }

    pub async fn list(&self) -> Result<Vec<Group>, DomainError> {
        Ok(self.groups.list().await?)
    }

    pub async fn update(&self, slug: &str, changes: GroupChanges) -> Result<Group, DomainError> {
        let mut group = self.get(slug).await?;
        group.revise(changes)?;
        Ok(self.groups.update(group).await?)
    }

    /// Delete a group. Its posts survive with the group reference cleared.
    pub async fn delete(&self, slug: &str) -> Result<(), DomainError> {
        let group = self.get(slug).await?;
        self.groups.delete(group.id()).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("group", slug),
            other => other.into(),
        })?;
        tracing::info!(group_slug = %slug, "Group deleted");
        Ok(())
    }
}
