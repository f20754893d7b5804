//! Mutation rights. Only the author may change or delete what they wrote;
//! there is no administrator override at this layer.

use uuid::Uuid;

use crate::domain::{Comment, Post, Viewer};

/// An entity with an owning author.
pub trait Owned {
    /// Entity name used in errors and logs.
    const KIND: &'static str;

    fn author_id(&self) -> Uuid;
}

impl Owned for Post {
    const KIND: &'static str = "post";

    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

impl Owned for Comment {
    const KIND: &'static str = "comment";

    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

pub fn can_mutate<E: Owned>(viewer: &Viewer, entity: &E) -> bool {
    viewer.is(entity.author_id())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::PostInput;

    #[test]
    fn test_only_author_may_mutate() {
        let author = Uuid::new_v4();
        let post = Post::new(author, PostInput::new("Title", "Text", Utc::now()));
        let comment = Comment::new(post.id, author, "Nice");

        let owner = Viewer::user(author, "author");
        let other = Viewer::user(Uuid::new_v4(), "other");

        assert!(can_mutate(&owner, &post));
        assert!(can_mutate(&owner, &comment));
        assert!(!can_mutate(&other, &post));
        assert!(!can_mutate(&other, &comment));
        assert!(!can_mutate(&Viewer::Anonymous, &comment));
    }
}
