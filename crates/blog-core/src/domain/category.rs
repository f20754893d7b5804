use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MAX_TITLE_LEN;
use crate::error::ValidationErrors;

/// Category entity - groups posts under a URL slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Unique, URL-safe identifier.
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new, published category.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            slug: slug.into(),
            is_published: true,
            created_at: Utc::now(),
        }
    }

    pub fn from_input(input: NewCategory) -> Self {
        let mut category = Self::new(input.title, input.description, input.slug);
        category.is_published = input.is_published;
        category
    }

    pub fn unpublished(mut self) -> Self {
        self.is_published = false;
        self
    }

    pub fn apply(&mut self, input: NewCategory) {
        self.title = input.title;
        self.description = input.description;
        self.slug = input.slug;
        self.is_published = input.is_published;
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        field_errors(&self.title, &self.slug).into_result()
    }
}

/// Back-office fields for creating or editing a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub slug: String,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_published() -> bool {
    true
}

impl NewCategory {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            slug: slug.into(),
            is_published: true,
        }
    }

    /// Field checks. Slug uniqueness is checked against the store.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        field_errors(&self.title, &self.slug).into_result()
    }
}

fn field_errors(title: &str, slug: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if title.trim().is_empty() {
        errors.add("title", "This field is required.");
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.add(
            "title",
            format!("Ensure this value has at most {MAX_TITLE_LEN} characters."),
        );
    }
    if !is_valid_slug(slug) {
        errors.add(
            "slug",
            "Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
        );
    }
    errors
}

/// `[-A-Za-z0-9_]+`
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("travel-notes_2024"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("путешествия"));
    }

    #[test]
    fn test_malformed_slug_rejected() {
        let errors = Category::new("Travel", "", "bad slug!")
            .validate()
            .unwrap_err();
        assert!(errors.has("slug"));
        assert!(!errors.has("title"));
    }

    #[test]
    fn test_new_category_requires_title() {
        let errors = NewCategory::new("  ", "", "travel").validate().unwrap_err();
        assert!(errors.has("title"));
        assert!(!errors.has("slug"));
        assert!(NewCategory::new("Travel", "", "travel").validate().is_ok());
    }
}
