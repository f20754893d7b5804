use serde::Serialize;
use uuid::Uuid;

/// Where the presentation layer should send the requester after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Redirect {
    /// The global feed.
    Feed,
    Profile { username: String },
    PostDetail { post_id: Uuid },
    /// The requester has no identity and must log in first.
    Login,
}

impl Redirect {
    /// Canonical route path of the target. `Login` resolves to `login_url`.
    pub fn path(&self, login_url: &str) -> String {
        match self {
            Self::Feed => "/".to_string(),
            Self::Profile { username } => format!("/profile/{username}/"),
            Self::PostDetail { post_id } => format!("/posts/{post_id}/"),
            Self::Login => login_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let id = Uuid::nil();
        assert_eq!(Redirect::Feed.path("/login/"), "/");
        assert_eq!(
            Redirect::Profile { username: "anna".into() }.path("/login/"),
            "/profile/anna/"
        );
        assert_eq!(
            Redirect::PostDetail { post_id: id }.path("/login/"),
            format!("/posts/{id}/")
        );
        assert_eq!(Redirect::Login.path("/auth/login/"), "/auth/login/");
    }
}
