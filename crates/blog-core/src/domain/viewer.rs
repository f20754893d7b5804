use uuid::Uuid;

/// The identity making the current request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Viewer {
    #[default]
    Anonymous,
    User { id: Uuid, username: String },
}

impl Viewer {
    pub fn user(id: Uuid, username: impl Into<String>) -> Self {
        Self::User {
            id,
            username: username.into(),
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        match self {
            Self::Anonymous => None,
            Self::User { id, .. } => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    /// True when this viewer is the given user. Anonymous is nobody.
    pub fn is(&self, user_id: Uuid) -> bool {
        self.id() == Some(user_id)
    }
}

impl std::fmt::Display for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::User { username, .. } => write!(f, "{username}"),
        }
    }
}
