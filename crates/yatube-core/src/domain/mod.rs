//! Domain entities - the core business objects.

mod group;
mod post;
mod user;

pub use group::{Group, GroupChanges, NewGroup};
pub use post::{POST_PREVIEW_CHARS, Post, PostDraft};
pub use user::User;
