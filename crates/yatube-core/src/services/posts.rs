use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use uuid::Uuid;

use super::{AuthorRef, GroupPage, GroupRef, PostCard, PostDetail, ProfilePage};
use crate::domain::{Post, PostDraft};
use crate::error::DomainError;
use crate::pagination::{POSTS_PER_PAGE, Page, Paginator};
use crate::ports::{GroupRepository, PostFilter, PostRepository, UserRepository};

/// Post authoring and the paginated post listings.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    per_page: u64,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
            per_page: POSTS_PER_PAGE,
        }
    }

    pub fn with_page_size(mut self, per_page: u64) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Publish a new post for `author_id`.
    pub async fn create(&self, author_id: Uuid, draft: PostDraft) -> Result<PostCard, DomainError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "author {author_id} does not exist"
            )));
        }
        self.ensure_group_exists(draft.group_id).await?;

        let post = Post::new(author_id, draft)?;
        let saved = self.posts.insert(post).await?;
        tracing::info!(post_id = %saved.id(), author_id = %author_id, "Post created");

        self.card(saved).await
    }

    /// Change text and group of a post. Only its author may do this.
    pub async fn update(
        &self,
        actor_id: Uuid,
        post_id: Uuid,
        draft: PostDraft,
    ) -> Result<PostCard, DomainError> {
        let mut post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        if !post.is_authored_by(actor_id) {
            tracing::warn!(post_id = %post_id, actor_id = %actor_id, "Edit rejected: not the author");
            return Err(DomainError::Forbidden(
                "only the author can edit this post".to_string(),
            ));
        }
        self.ensure_group_exists(draft.group_id).await?;

        post.edit(draft)?;
        let saved = self.posts.update(post).await?;
        tracing::info!(post_id = %post_id, "Post updated");

        self.card(saved).await
    }

    pub async fn detail(&self, post_id: Uuid) -> Result<PostDetail, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        let author_posts_count = self.posts.count(PostFilter::Author(post.author_id())).await?;

        Ok(PostDetail {
            post: self.card(post).await?,
            author_posts_count,
        })
    }

    /// Every post, newest first.
    pub async fn index(&self, page: Option<&str>) -> Result<Page<PostCard>, DomainError> {
        self.list(PostFilter::All, page).await
    }

    pub async fn group_posts(&self, slug: &str, page: Option<&str>) -> Result<GroupPage, DomainError> {
        let group = self
            .groups
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("group", slug))?;

        let posts = self.list(PostFilter::Group(group.id()), page).await?;
        Ok(GroupPage { group, posts })
    }

    pub async fn profile(&self, username: &str, page: Option<&str>) -> Result<ProfilePage, DomainError> {
        let author = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let posts = self.list(PostFilter::Author(author.id), page).await?;
        Ok(ProfilePage {
            author: AuthorRef::from(&author),
            posts,
        })
    }

    async fn list(&self, filter: PostFilter, page: Option<&str>) -> Result<Page<PostCard>, DomainError> {
        let total = self.posts.count(filter).await?;
        let paginator = Paginator::new(total, self.per_page);
        let number = paginator.resolve(page);

        let posts = self
            .posts
            .find_slice(filter, paginator.offset(number), paginator.per_page())
            .await?;

        Ok(paginator.page(number, self.cards(posts).await?))
    }

    async fn ensure_group_exists(&self, group_id: Option<Uuid>) -> Result<(), DomainError> {
        if let Some(id) = group_id {
            if self.groups.find_by_id(id).await?.is_none() {
                return Err(DomainError::Validation(format!("group {id} does not exist")));
            }
        }
        Ok(())
    }

    async fn card(&self, post: Post) -> Result<PostCard, DomainError> {
        let mut cards = self.cards(vec![post]).await?;
        cards
            .pop()
            .ok_or_else(|| DomainError::Internal("post card lost".to_string()))
    }

    /// Join posts with their authors and groups using one lookup per table.
    async fn cards(&self, posts: Vec<Post>) -> Result<Vec<PostCard>, DomainError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<Uuid> = posts
            .iter()
            .map(Post::author_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let group_ids: Vec<Uuid> = posts
            .iter()
            .filter_map(Post::group_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let authors: HashMap<Uuid, AuthorRef> = self
            .users
            .find_by_ids(&author_ids)
            .await?
            .iter()
            .map(|u| (u.id, AuthorRef::from(u)))
            .collect();
        let groups: HashMap<Uuid, GroupRef> = if group_ids.is_empty() {
            HashMap::new()
        } else {
            self.groups
                .find_by_ids(&group_ids)
                .await?
                .iter()
                .map(|g| (g.id(), GroupRef::from(g)))
                .collect()
        };

        posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.author_id()).cloned().ok_or_else(|| {
                    DomainError::Internal(format!("author of post {} is missing", post.id()))
                })?;
                let group = post.group_id().and_then(|id| groups.get(&id).cloned());
                Ok(PostCard {
                    id: post.id(),
                    text: post.text().to_string(),
                    pub_date: post.pub_date(),
                    author,
                    group,
                })
            })
            .collect()
    }
}
