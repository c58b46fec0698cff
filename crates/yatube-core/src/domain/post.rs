use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Number of leading characters used for a post's short representation.
pub const POST_PREVIEW_CHARS: usize = 15;

/// Post entity - a single authored text entry.
///
/// `pub_date` is assigned once at construction and has no setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    id: Uuid,
    text: String,
    pub_date: DateTime<Utc>,
    author_id: Uuid,
    group_id: Option<Uuid>,
}

/// Author-supplied fields of a post, used for both create and edit.
#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub text: String,
    #[serde(default)]
    pub group_id: Option<Uuid>,
}

impl Post {
    /// Create a new post stamped with the current time.
    pub fn new(author_id: Uuid, draft: PostDraft) -> Result<Self, DomainError> {
        validate_text(&draft.text)?;
        Ok(Self {
            id: Uuid::new_v4(),
            text: draft.text,
            pub_date: Utc::now(),
            author_id,
            group_id: draft.group_id,
        })
    }

    /// Rebuild a post from persisted fields.
    pub fn restore(
        id: Uuid,
        text: String,
        pub_date: DateTime<Utc>,
        author_id: Uuid,
        group_id: Option<Uuid>,
    ) -> Self {
        Self {
            id,
            text,
            pub_date,
            author_id,
            group_id,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pub_date(&self) -> DateTime<Utc> {
        self.pub_date
    }

    pub fn author_id(&self) -> Uuid {
        self.author_id
    }

    pub fn group_id(&self) -> Option<Uuid> {
        self.group_id
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Replace text and group. The author and publication date never change.
    pub fn edit(&mut self, draft: PostDraft) -> Result<(), DomainError> {
        validate_text(&draft.text)?;
        self.text = draft.text;
        self.group_id = draft.group_id;
        Ok(())
    }

    /// Clear the group reference (the group was deleted).
    pub fn detach_group(&mut self) {
        self.group_id = None;
    }

    /// The first [`POST_PREVIEW_CHARS`] characters of the text.
    pub fn preview(&self) -> &str {
        match self.text.char_indices().nth(POST_PREVIEW_CHARS) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.preview())
    }
}

fn validate_text(text: &str) -> Result<(), DomainError> {
    if text.trim().is_empty() {
        return Err(DomainError::Validation("post text is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str) -> PostDraft {
        PostDraft {
            text: text.to_string(),
            group_id: None,
        }
    }

    #[test]
    fn test_display_is_first_fifteen_chars() {
        let post = Post::new(Uuid::new_v4(), draft("Test first fifteen chars of text")).unwrap();
        assert_eq!(post.to_string(), "Test first fift");
    }

    #[test]
    fn test_display_short_text_is_whole_text() {
        let post = Post::new(Uuid::new_v4(), draft("Short")).unwrap();
        assert_eq!(post.to_string(), "Short");

        let exact = Post::new(Uuid::new_v4(), draft("exactly fifteen")).unwrap();
        assert_eq!(exact.to_string(), "exactly fifteen");
    }

    #[test]
    fn test_display_counts_characters_not_bytes() {
        let post = Post::new(Uuid::new_v4(), draft("Тестовый пост про котиков")).unwrap();
        assert_eq!(post.to_string(), "Тестовый пост п");
    }

    #[test]
    fn test_blank_text_rejected() {
        let result = Post::new(Uuid::new_v4(), draft("  \n "));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_edit_keeps_author_and_pub_date() {
        let author = Uuid::new_v4();
        let group = Uuid::new_v4();
        let mut post = Post::new(author, draft("Original text")).unwrap();
        let published = post.pub_date();

        post.edit(PostDraft {
            text: "Changed text".to_string(),
            group_id: Some(group),
        })
        .unwrap();

        assert_eq!(post.text(), "Changed text");
        assert_eq!(post.group_id(), Some(group));
        assert_eq!(post.author_id(), author);
        assert_eq!(post.pub_date(), published);
    }

    #[test]
    fn test_detach_group() {
        let mut post = Post::new(
            Uuid::new_v4(),
            PostDraft {
                text: "In a group".to_string(),
                group_id: Some(Uuid::new_v4()),
            },
        )
        .unwrap();
        post.detach_group();
        assert_eq!(post.group_id(), None);
    }
}
