//! Post visibility.
//!
//! A post is publicly visible when it is published, its `pub_date` is not
//! in the future, and its category, if it has one, is published. Authors
//! always see their own posts. Comments have no visibility rule of their
//! own: they are reachable only through a post the viewer can see.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Post, PostRecord, Viewer};

/// The public visibility gate. `category` must be the post's attached
/// category when `post.category_id` is set.
pub fn is_publicly_visible(post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
    if !post.is_published || post.pub_date > now {
        return false;
    }
    match post.category_id {
        None => true,
        // A dangling reference is treated as hidden.
        Some(id) => category.is_some_and(|c| c.id == id && c.is_published),
    }
}

pub fn record_is_publicly_visible(record: &PostRecord, now: DateTime<Utc>) -> bool {
    is_publicly_visible(&record.post, record.category(), now)
}

/// Owner bypass first, public rule second.
pub fn can_view_post(
    viewer: &Viewer,
    post: &Post,
    category: Option<&Category>,
    now: DateTime<Utc>,
) -> bool {
    viewer.is(post.author_id) || is_publicly_visible(post, category, now)
}

/// Whether a listing scoped to `owner`'s posts must apply the public rule
/// for this viewer. Listings with no single owner always do.
pub fn requires_public_filter(viewer: &Viewer, owner: Option<Uuid>) -> bool {
    !owner.is_some_and(|owner| viewer.is(owner))
}

/// The subset of `records` the viewer may see.
pub fn visible_posts(
    viewer: &Viewer,
    owner: Option<Uuid>,
    records: Vec<PostRecord>,
    now: DateTime<Utc>,
) -> Vec<PostRecord> {
    if !requires_public_filter(viewer, owner) {
        return records;
    }
    records
        .into_iter()
        .filter(|r| record_is_publicly_visible(r, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::{PostInput, PostRelations};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn post_at(pub_date: DateTime<Utc>) -> Post {
        Post::new(Uuid::new_v4(), PostInput::new("Title", "Text", pub_date))
    }

    fn record(post: Post, category: Option<Category>) -> PostRecord {
        PostRecord {
            post,
            relations: Some(PostRelations {
                author: None,
                category,
                location: None,
            }),
            comment_count: None,
        }
    }

    #[test]
    fn test_published_past_post_is_visible() {
        let post = post_at(now() - Duration::hours(1));
        assert!(is_publicly_visible(&post, None, now()));
    }

    #[test]
    fn test_pub_date_equal_to_now_is_visible() {
        let post = post_at(now());
        assert!(is_publicly_visible(&post, None, now()));
    }

    #[test]
    fn test_future_post_is_hidden() {
        let post = post_at(now() + Duration::seconds(1));
        assert!(!is_publicly_visible(&post, None, now()));
    }

    #[test]
    fn test_unpublished_post_is_hidden() {
        let mut post = post_at(now() - Duration::hours(1));
        post.is_published = false;
        assert!(!is_publicly_visible(&post, None, now()));
    }

    #[test]
    fn test_category_gate() {
        let category = Category::new("Travel", "", "travel");
        let mut post = post_at(now() - Duration::hours(1));
        post.category_id = Some(category.id);

        assert!(is_publicly_visible(&post, Some(&category), now()));

        let hidden = category.clone().unpublished();
        assert!(!is_publicly_visible(&post, Some(&hidden), now()));
        // Category attached but not loaded.
        assert!(!is_publicly_visible(&post, None, now()));
    }

    #[test]
    fn test_owner_bypass() {
        let mut post = post_at(now() + Duration::days(3));
        post.is_published = false;
        let owner = Viewer::user(post.author_id, "author");
        let stranger = Viewer::user(Uuid::new_v4(), "stranger");

        assert!(can_view_post(&owner, &post, None, now()));
        assert!(!can_view_post(&stranger, &post, None, now()));
        assert!(!can_view_post(&Viewer::Anonymous, &post, None, now()));
    }

    #[test]
    fn test_visible_posts_filters_unless_owner() {
        let author = Uuid::new_v4();
        let mut draft = Post::new(author, PostInput::new("Draft", "Text", now()));
        draft.is_published = false;
        let public = Post::new(author, PostInput::new("Public", "Text", now()));
        let records = vec![record(draft, None), record(public.clone(), None)];

        let own = visible_posts(&Viewer::user(author, "author"), Some(author), records.clone(), now());
        assert_eq!(own.len(), 2);

        let others = visible_posts(&Viewer::Anonymous, Some(author), records.clone(), now());
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].post.id, public.id);

        // No owner: the author gets no bypass on shared feeds.
        let feed = visible_posts(&Viewer::user(author, "author"), None, records, now());
        assert_eq!(feed.len(), 1);
    }
}
