use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, Location, MAX_TITLE_LEN, User};
use crate::error::ValidationErrors;

/// Post entity - a dated publication, possibly scheduled for the future.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    /// Reference to an uploaded image, owned by the media collaborator.
    pub image: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(author_id: Uuid, input: PostInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: input.title,
            text: input.text,
            pub_date: input.pub_date,
            category_id: input.category_id,
            location_id: input.location_id,
            image: input.image,
            is_published: input.is_published,
            created_at: Utc::now(),
        }
    }

    /// Apply submitted fields. Author and creation time never change.
    pub fn apply(&mut self, input: PostInput) {
        self.title = input.title;
        self.text = input.text;
        self.pub_date = input.pub_date;
        self.category_id = input.category_id;
        self.location_id = input.location_id;
        self.image = input.image;
        self.is_published = input.is_published;
    }
}

/// Submitted post fields. There is no author field: the author is always
/// the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_published() -> bool {
    true
}

impl PostInput {
    pub fn new(title: impl Into<String>, text: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            pub_date,
            category_id: None,
            location_id: None,
            image: None,
            is_published: true,
        }
    }

    pub fn in_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn at_location(mut self, location_id: Uuid) -> Self {
        self.location_id = Some(location_id);
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.is_published = false;
        self
    }

    /// Field-level checks. Whether the referenced category and location
    /// exist is checked against the store by the caller.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", "This field is required.");
        } else if self.title.chars().count() > MAX_TITLE_LEN {
            errors.add(
                "title",
                format!("Ensure this value has at most {MAX_TITLE_LEN} characters."),
            );
        }
        if self.text.trim().is_empty() {
            errors.add("text", "This field is required.");
        }
        errors
    }
}

/// Relations loaded alongside a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostRelations {
    pub author: Option<User>,
    pub category: Option<Category>,
    pub location: Option<Location>,
}

/// A post as returned by a listing query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    pub post: Post,
    /// `None` when relations were not requested.
    pub relations: Option<PostRelations>,
    /// `None` when comment counts were not requested.
    pub comment_count: Option<u64>,
}

impl PostRecord {
    pub fn bare(post: Post) -> Self {
        Self {
            post,
            relations: None,
            comment_count: None,
        }
    }

    pub fn category(&self) -> Option<&Category> {
        self.relations.as_ref().and_then(|r| r.category.as_ref())
    }
}
