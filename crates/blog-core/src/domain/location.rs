use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MAX_TITLE_LEN;
use crate::error::ValidationErrors;

/// Location entity - a named place a post may be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_published: true,
            created_at: Utc::now(),
        }
    }

    pub fn from_input(input: NewLocation) -> Self {
        let mut location = Self::new(input.name);
        location.is_published = input.is_published;
        location
    }

    pub fn apply(&mut self, input: NewLocation) {
        self.name = input.name;
        self.is_published = input.is_published;
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        name_errors(&self.name).into_result()
    }
}

/// Back-office fields for creating or editing a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLocation {
    pub name: String,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_published() -> bool {
    true
}

impl NewLocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_published: true,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        name_errors(&self.name).into_result()
    }
}

fn name_errors(name: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if name.trim().is_empty() {
        errors.add("name", "This field is required.");
    } else if name.chars().count() > MAX_TITLE_LEN {
        errors.add(
            "name",
            format!("Ensure this value has at most {MAX_TITLE_LEN} characters."),
        );
    }
    errors
}
