//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod clock;
mod repository;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use clock::{Clock, SystemClock};
pub use repository::{
    BaseRepository, CategoryRepository, CommentRepository, LocationRepository, PostQuery,
    PostRepository, PostScope, Repositories, UserRepository,
};
