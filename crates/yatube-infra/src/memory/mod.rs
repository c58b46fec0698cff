//! In-memory storage - used when no database is configured and in tests.
//!
//! All three tables live behind one lock so that delete rules (posts cascade
//! with their author, detach from their group) apply atomically.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use yatube_core::domain::{Group, Post, User};
use yatube_core::error::RepoError;
use yatube_core::ports::{
    BaseRepository, GroupRepository, PostFilter, PostRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    groups: HashMap<Uuid, Group>,
    posts: HashMap<Uuid, Post>,
}

impl Tables {
    fn check_post_refs(&self, post: &Post) -> Result<(), RepoError> {
        if !self.users.contains_key(&post.author_id()) {
            return Err(RepoError::ForeignKeyViolation(format!(
                "posts.author_id {} has no matching user",
                post.author_id()
            )));
        }
        if let Some(group_id) = post.group_id() {
            if !self.groups.contains_key(&group_id) {
                return Err(RepoError::ForeignKeyViolation(format!(
                    "posts.group_id {group_id} has no matching group"
                )));
            }
        }
        Ok(())
    }

    fn posts_matching(&self, filter: PostFilter) -> impl Iterator<Item = &Post> {
        self.posts.values().filter(move |post| match filter {
            PostFilter::All => true,
            PostFilter::Group(id) => post.group_id() == Some(id),
            PostFilter::Author(id) => post.author_id() == id,
        })
    }
}

/// Users, groups and posts held in process memory.
///
/// Note: Data is lost on process restart.
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.id)
            || tables.users.values().any(|u| u.username == user.username)
        {
            return Err(RepoError::UniqueViolation("users.username".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(RepoError::UniqueViolation("users.username".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;
        tables.posts.retain(|_, post| post.author_id() != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Group, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        Ok(self.tables.read().await.groups.get(&id).cloned())
    }

    async fn insert(&self, group: Group) -> Result<Group, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.groups.contains_key(&group.id())
            || tables.groups.values().any(|g| g.slug() == group.slug())
        {
            return Err(RepoError::UniqueViolation("groups.slug".to_string()));
        }
        tables.groups.insert(group.id(), group.clone());
        Ok(group)
    }

    async fn update(&self, group: Group) -> Result<Group, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.groups.contains_key(&group.id()) {
            return Err(RepoError::NotFound);
        }
        if tables
            .groups
            .values()
            .any(|g| g.id() != group.id() && g.slug() == group.slug())
        {
            return Err(RepoError::UniqueViolation("groups.slug".to_string()));
        }
        tables.groups.insert(group.id(), group.clone());
        Ok(group)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.groups.remove(&id).ok_or(RepoError::NotFound)?;
        tables
            .posts
            .values_mut()
            .filter(|post| post.group_id() == Some(id))
            .for_each(Post::detach_group);
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.groups.values().find(|g| g.slug() == slug).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Group>, RepoError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.groups.get(id).cloned())
            .collect())
    }

    async fn list(&self) -> Result<Vec<Group>, RepoError> {
        let tables = self.tables.read().await;
        let mut groups: Vec<Group> = tables.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.title().cmp(b.title()));
        Ok(groups)
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.contains_key(&post.id()) {
            return Err(RepoError::UniqueViolation("posts.id".to_string()));
        }
        tables.check_post_refs(&post)?;
        tables.posts.insert(post.id(), post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&post.id()) {
            return Err(RepoError::NotFound);
        }
        tables.check_post_refs(&post)?;
        tables.posts.insert(post.id(), post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.posts.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts_matching(filter).count() as u64)
    }

    async fn find_slice(
        &self,
        filter: PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<&Post> = tables.posts_matching(filter).collect();
        posts.sort_by(|a, b| {
            b.pub_date()
                .cmp(&a.pub_date())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use yatube_core::domain::{NewGroup, PostDraft};

    use super::*;

    fn user(name: &str) -> User {
        User::new(name.to_string(), "hash".to_string()).unwrap()
    }

    fn group(slug: &str) -> Group {
        Group::new(NewGroup {
            title: format!("Group {slug}"),
            slug: slug.to_string(),
            description: String::new(),
        })
        .unwrap()
    }

    fn post(author: &User, group: Option<&Group>) -> Post {
        Post::new(
            author.id,
            PostDraft {
                text: "Test post text".to_string(),
                group_id: group.map(Group::id),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let store = MemoryStore::new();
        let groups: &dyn GroupRepository = &store;

        groups.insert(group("cats")).await.unwrap();
        let result = groups.insert(group("cats")).await;

        assert!(matches!(result, Err(RepoError::UniqueViolation(_))));
    }

    #[tokio::test]
    async fn test_post_requires_existing_author_and_group() {
        let store = MemoryStore::new();
        let posts: &dyn PostRepository = &store;
        let stranger = user("stranger");

        let result = posts.insert(post(&stranger, None)).await;
        assert!(matches!(result, Err(RepoError::ForeignKeyViolation(_))));

        let users: &dyn UserRepository = &store;
        users.insert(stranger.clone()).await.unwrap();
        let missing_group = group("ghosts");
        let result = posts.insert(post(&stranger, Some(&missing_group))).await;
        assert!(matches!(result, Err(RepoError::ForeignKeyViolation(_))));
    }

    #[tokio::test]
    async fn test_deleting_group_detaches_posts() {
        let store = MemoryStore::new();
        let users: &dyn UserRepository = &store;
        let groups: &dyn GroupRepository = &store;
        let posts: &dyn PostRepository = &store;

        let author = users.insert(user("author")).await.unwrap();
        let cats = groups.insert(group("cats")).await.unwrap();
        let saved = posts.insert(post(&author, Some(&cats))).await.unwrap();

        groups.delete(cats.id()).await.unwrap();

        let reloaded = posts.find_by_id(saved.id()).await.unwrap().unwrap();
        assert_eq!(reloaded.group_id(), None);
        assert_eq!(posts.count(PostFilter::All).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deleting_user_deletes_their_posts() {
        let store = MemoryStore::new();
        let users: &dyn UserRepository = &store;
        let posts: &dyn PostRepository = &store;

        let author = users.insert(user("author")).await.unwrap();
        let other = users.insert(user("other")).await.unwrap();
        let doomed = posts.insert(post(&author, None)).await.unwrap();
        posts.insert(post(&other, None)).await.unwrap();

        users.delete(author.id).await.unwrap();

        assert!(posts.find_by_id(doomed.id()).await.unwrap().is_none());
        assert_eq!(posts.count(PostFilter::All).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_slices_are_newest_first() {
        let store = MemoryStore::new();
        let users: &dyn UserRepository = &store;
        let posts: &dyn PostRepository = &store;

        let author = users.insert(user("author")).await.unwrap();
        let now = Utc::now();
        for age in [3, 1, 2] {
            let post = Post::restore(
                Uuid::new_v4(),
                format!("{age} hours old"),
                now - Duration::hours(age),
                author.id,
                None,
            );
            posts.insert(post).await.unwrap();
        }

        let texts: Vec<String> = posts
            .find_slice(PostFilter::Author(author.id), 0, 10)
            .await
            .unwrap()
            .iter()
            .map(|p| p.text().to_string())
            .collect();
        assert_eq!(texts, ["1 hours old", "2 hours old", "3 hours old"]);
    }

    #[tokio::test]
    async fn test_same_instant_posts_keep_a_stable_order_across_pages() {
        let store = MemoryStore::new();
        let users: &dyn UserRepository = &store;
        let posts: &dyn PostRepository = &store;

        let author = users.insert(user("batch")).await.unwrap();
        let published = Utc::now();
        let mut ids = Vec::new();
        for n in 0..5 {
            let post = Post::restore(Uuid::new_v4(), format!("post {n}"), published, author.id, None);
            ids.push(post.id());
            posts.insert(post).await.unwrap();
        }
        ids.sort_by(|a, b| b.cmp(a));

        let mut seen = Vec::new();
        for offset in [0, 2, 4] {
            let slice = posts.find_slice(PostFilter::All, offset, 2).await.unwrap();
            seen.extend(slice.iter().map(Post::id));
        }
        assert_eq!(seen, ids);

        let tail = posts.find_slice(PostFilter::All, 2, 10).await.unwrap();
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].text(), "3 hours old");
    }
}
