use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;
use crate::error::ValidationErrors;

/// Comment entity - belongs to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, author_id: Uuid, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            text: text.into(),
            is_published: true,
            created_at: Utc::now(),
        }
    }
}

/// Submitted comment fields. Post and author come from the request path
/// and the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentInput {
    pub text: String,
}

impl CommentInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.text.trim().is_empty() {
            errors.add("text", "This field is required.");
        }
        errors.into_result()
    }
}

/// A comment with its author loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRecord {
    pub comment: Comment,
    pub author: Option<User>,
}
