//! Decision rules: who may see a post, and who may change it.

mod ownership;
mod visibility;

pub use ownership::{Owned, can_mutate};
pub use visibility::{
    can_view_post, is_publicly_visible, record_is_publicly_visible, requires_public_filter,
    visible_posts,
};
