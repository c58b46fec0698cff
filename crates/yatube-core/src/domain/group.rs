use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

const TITLE_MAX_CHARS: usize = 200;
const SLUG_MAX_CHARS: usize = 50;

/// Group entity - a topical community posts may belong to.
///
/// The slug is fixed at creation; only the title and description can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: Uuid,
    title: String,
    slug: String,
    description: String,
}

/// Input for creating a group.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGroup {
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// Partial update of a group's editable fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupChanges {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Group {
    /// Create a new group after validating title and slug.
    pub fn new(input: NewGroup) -> Result<Self, DomainError> {
        validate_title(&input.title)?;
        validate_slug(&input.slug)?;
        Ok(Self {
            id: Uuid::new_v4(),
            title: input.title,
            slug: input.slug,
            description: input.description,
        })
    }

    /// Rebuild a group from persisted fields.
    pub fn restore(id: Uuid, title: String, slug: String, description: String) -> Self {
        Self {
            id,
            title,
            slug,
            description,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Apply title/description edits.
    pub fn revise(&mut self, changes: GroupChanges) -> Result<(), DomainError> {
        if let Some(title) = changes.title {
            validate_title(&title)?;
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        Ok(())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    let len = title.trim().chars().count();
    if len == 0 || title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::Validation(format!(
            "group title must be 1 to {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

/// Slugs are ASCII letters, digits, hyphens and underscores.
fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() || slug.len() > SLUG_MAX_CHARS {
        return Err(DomainError::Validation(format!(
            "slug must be 1 to {SLUG_MAX_CHARS} characters"
        )));
    }
    if !slug
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(DomainError::Validation(
            "slug may only contain letters, digits, hyphens and underscores".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_group(slug: &str) -> NewGroup {
        NewGroup {
            title: "Test group title".to_string(),
            slug: slug.to_string(),
            description: "Test group description".to_string(),
        }
    }

    #[test]
    fn test_display_is_title() {
        let group = Group::new(new_group("test_group")).unwrap();
        assert_eq!(group.to_string(), "Test group title");
        assert_eq!(group.to_string(), group.title());
    }

    #[test]
    fn test_slug_rules() {
        assert!(Group::new(new_group("test-group-one")).is_ok());
        assert!(Group::new(new_group("")).is_err());
        assert!(Group::new(new_group("with space")).is_err());
        assert!(Group::new(new_group("кириллица")).is_err());
        assert!(Group::new(new_group(&"s".repeat(51))).is_err());
    }

    #[test]
    fn test_revise_keeps_slug() {
        let mut group = Group::new(new_group("cats")).unwrap();
        group
            .revise(GroupChanges {
                title: Some("Cats and kittens".to_string()),
                description: None,
            })
            .unwrap();
        assert_eq!(group.title(), "Cats and kittens");
        assert_eq!(group.slug(), "cats");
        assert_eq!(group.description(), "Test group description");
    }

    #[test]
    fn test_revise_rejects_blank_title() {
        let mut group = Group::new(new_group("cats")).unwrap();
        let result = group.revise(GroupChanges {
            title: Some("   ".to_string()),
            description: None,
        });
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(group.title(), "Test group title");
    }
}
