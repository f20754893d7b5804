use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationErrors;

const MAX_USERNAME_LEN: usize = 150;
const MAX_NAME_LEN: usize = 150;

/// User entity - an identity owned by the authentication subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable profile fields.
    pub fn apply_profile(&mut self, input: ProfileInput) {
        self.username = input.username;
        self.first_name = input.first_name;
        self.last_name = input.last_name;
        self.email = input.email;
        self.updated_at = Utc::now();
    }
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl ProfileInput {
    /// Check field constraints. Username uniqueness is checked by the caller
    /// against the store.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.username.trim().is_empty() {
            errors.add("username", "This field is required.");
        } else if self.username.chars().count() > MAX_USERNAME_LEN {
            errors.add(
                "username",
                format!("Ensure this value has at most {MAX_USERNAME_LEN} characters."),
            );
        } else if !self.username.chars().all(is_username_char) {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }

        if !self.email.is_empty() && !self.email.contains('@') {
            errors.add("email", "Enter a valid email address.");
        }
        if self.first_name.chars().count() > MAX_NAME_LEN {
            errors.add(
                "first_name",
                format!("Ensure this value has at most {MAX_NAME_LEN} characters."),
            );
        }
        if self.last_name.chars().count() > MAX_NAME_LEN {
            errors.add(
                "last_name",
                format!("Ensure this value has at most {MAX_NAME_LEN} characters."),
            );
        }

        errors.into_result()
    }
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(username: &str, email: &str) -> ProfileInput {
        ProfileInput {
            username: username.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_profile() {
        assert!(input("anna.k+blog", "anna@example.com").validate().is_ok());
        assert!(input("anna", "").validate().is_ok());
    }

    #[test]
    fn test_username_rules() {
        assert!(input("", "").validate().unwrap_err().has("username"));
        assert!(input("has space", "").validate().unwrap_err().has("username"));
        let long = "a".repeat(151);
        assert!(input(&long, "").validate().unwrap_err().has("username"));
    }

    #[test]
    fn test_email_must_contain_at() {
        let errors = input("anna", "not-an-email").validate().unwrap_err();
        assert!(errors.has("email"));
        assert!(!errors.has("username"));
    }
}
