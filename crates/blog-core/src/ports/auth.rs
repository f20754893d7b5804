//! Authentication port. Identities are issued by an external provider;
//! this crate only needs to turn a presented token into a viewer.

use uuid::Uuid;

use crate::domain::Viewer;

/// Claims carried by an access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub username: String,
    pub exp: i64,
}

impl From<TokenClaims> for Viewer {
    fn from(claims: TokenClaims) -> Self {
        Viewer::user(claims.user_id, claims.username)
    }
}

/// Token service trait for access token operations.
pub trait TokenService: Send + Sync {
    /// Issue an access token for a user.
    fn generate_token(&self, user_id: Uuid, username: &str) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
