//! Blog services - every storage handle is injected at construction and the
//! acting user is passed explicitly to each operation.

mod groups;
mod posts;
mod users;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Group, User};
use crate::pagination::Page;

pub use groups::GroupService;
pub use posts::PostService;
pub use users::UserService;

/// Public view of a post's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRef {
    pub id: Uuid,
    pub username: String,
}

impl From<&User> for AuthorRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Public view of the group a post belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRef {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

impl From<&Group> for GroupRef {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id(),
            title: group.title().to_string(),
            slug: group.slug().to_string(),
        }
    }
}

/// A post joined with its author and group, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub id: Uuid,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author: AuthorRef,
    pub group: Option<GroupRef>,
}

/// Single post page: the post plus how many posts its author has written.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: PostCard,
    pub author_posts_count: u64,
}

/// Posts of one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupPage {
    pub group: Group,
    pub posts: Page<PostCard>,
}

/// Posts of one author.
#[derive(Debug, Clone, Serialize)]
pub struct ProfilePage {
    pub author: AuthorRef,
    pub posts: Page<PostCard>,
}
