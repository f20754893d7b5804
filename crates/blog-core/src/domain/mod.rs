//! Domain entities - the core business objects.

mod category;
mod comment;
mod location;
mod post;
mod redirect;
mod user;
mod viewer;

pub use category::{Category, NewCategory};
pub use comment::{Comment, CommentInput, CommentRecord};
pub use location::{Location, NewLocation};
pub use post::{Post, PostInput, PostRecord, PostRelations};
pub use redirect::Redirect;
pub use user::{ProfileInput, User};
pub use viewer::Viewer;

/// Longest accepted title or name, in characters.
pub const MAX_TITLE_LEN: usize = 256;
