mod common;

use chrono::Duration;
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{PostInput, Viewer};
use blog_core::ports::PostScope;
use blog_core::services::QueryOptions;

use common::Blog;

fn titles(records: &[blog_core::domain::PostRecord]) -> Vec<&str> {
    records.iter().map(|r| r.post.title.as_str()).collect()
}

#[tokio::test]
async fn test_anonymous_feed_shows_only_public_posts() {
    let blog = Blog::new();
    let (anna, _) = blog.user("anna").await;
    let open = blog.category("open", true).await;
    let closed = blog.category("closed", false).await;
    let past = blog.hours_ago(2);

    blog.post(&anna, PostInput::new("no category", "Text", past)).await;
    blog.post(&anna, PostInput::new("open category", "Text", past).in_category(open.id))
        .await;
    blog.post(&anna, PostInput::new("closed category", "Text", past).in_category(closed.id))
        .await;
    blog.post(&anna, PostInput::new("draft", "Text", past).unpublished())
        .await;
    blog.post(&anna, PostInput::new("scheduled", "Text", blog.now() + Duration::minutes(1)))
        .await;
    blog.post(&anna, PostInput::new("exactly now", "Text", blog.now()))
        .await;

    let page = blog.listing.global_feed(&Viewer::Anonymous, None).await.unwrap();

    assert_eq!(
        titles(&page.items),
        vec!["exactly now", "no category", "open category"]
    );
    assert_eq!(page.total_count, 3);
}

#[tokio::test]
async fn test_author_gets_no_bypass_on_global_feed() {
    let blog = Blog::new();
    let (anna, viewer) = blog.user("anna").await;
    blog.post(&anna, PostInput::new("draft", "Text", blog.hours_ago(1)).unpublished())
        .await;

    let page = blog.listing.global_feed(&viewer, None).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_feed_orders_by_pub_date_with_stable_ties() {
    let blog = Blog::new();
    let (anna, _) = blog.user("anna").await;
    let same = blog.hours_ago(3);

    blog.post(&anna, PostInput::new("tie first", "Text", same)).await;
    blog.post(&anna, PostInput::new("newest", "Text", blog.hours_ago(1)))
        .await;
    blog.post(&anna, PostInput::new("tie second", "Text", same)).await;
    blog.post(&anna, PostInput::new("oldest", "Text", blog.hours_ago(9)))
        .await;

    let page = blog.listing.global_feed(&Viewer::Anonymous, None).await.unwrap();
    assert_eq!(
        titles(&page.items),
        vec!["newest", "tie first", "tie second", "oldest"]
    );
}

#[tokio::test]
async fn test_page_past_the_end_returns_last_page() {
    let blog = Blog::new();
    let (anna, _) = blog.user("anna").await;
    for i in 0..25 {
        blog.post(&anna, PostInput::new(format!("post {i}"), "Text", blog.hours_ago(1 + i)))
            .await;
    }

    let last = blog.listing.global_feed(&Viewer::Anonymous, Some("3")).await.unwrap();
    let overflow = blog.listing.global_feed(&Viewer::Anonymous, Some("4")).await.unwrap();

    assert_eq!(overflow.number, 3);
    assert_eq!(overflow.num_pages, 3);
    assert_eq!(overflow.items.len(), 5);
    assert_eq!(titles(&overflow.items), titles(&last.items));
    assert_eq!(overflow.items[4].post.title, "post 24");
}

#[tokio::test]
async fn test_feed_counts_comments() {
    let blog = Blog::new();
    let (anna, _) = blog.user("anna").await;
    let (boris, _) = blog.user("boris").await;
    let post = blog.public_post(&anna, "commented").await;
    blog.comment(&post, &boris, "one").await;
    blog.comment(&post, &anna, "two").await;
    blog.public_post(&anna, "quiet").await;

    let page = blog.listing.global_feed(&Viewer::Anonymous, None).await.unwrap();

    let counts: Vec<(&str, Option<u64>)> = page
        .items
        .iter()
        .map(|r| (r.post.title.as_str(), r.comment_count))
        .collect();
    assert!(counts.contains(&("commented", Some(2))));
    assert!(counts.contains(&("quiet", Some(0))));

    let author = page.items[0].relations.as_ref().unwrap().author.as_ref().unwrap();
    assert_eq!(author.username, "anna");
}

#[tokio::test]
async fn test_scheduled_post_appears_once_its_time_comes() {
    let blog = Blog::new();
    let (anna, _) = blog.user("anna").await;
    let at = blog.now() + Duration::hours(1);
    blog.post(&anna, PostInput::new("scheduled", "Text", at)).await;

    let before = blog.listing.global_feed(&Viewer::Anonymous, None).await.unwrap();
    assert!(before.items.is_empty());

    blog.clock.set(at);
    let after = blog.listing.global_feed(&Viewer::Anonymous, None).await.unwrap();
    assert_eq!(titles(&after.items), vec!["scheduled"]);
}

#[tokio::test]
async fn test_category_feed() {
    let blog = Blog::new();
    let (anna, _) = blog.user("anna").await;
    let travel = blog.category("travel", true).await;
    let food = blog.category("food", true).await;
    let past = blog.hours_ago(1);

    blog.post(&anna, PostInput::new("trip", "Text", past).in_category(travel.id))
        .await;
    blog.post(&anna, PostInput::new("trip draft", "Text", past).in_category(travel.id).unpublished())
        .await;
    blog.post(&anna, PostInput::new("soup", "Text", past).in_category(food.id))
        .await;

    let feed = blog
        .listing
        .category_feed(&Viewer::Anonymous, "travel", None)
        .await
        .unwrap();

    assert_eq!(feed.category.id, travel.id);
    assert_eq!(titles(&feed.page.items), vec!["trip"]);
}

#[tokio::test]
async fn test_unpublished_or_missing_category_is_not_found() {
    let blog = Blog::new();
    blog.category("hidden", false).await;

    for slug in ["hidden", "missing"] {
        let result = blog.listing.category_feed(&Viewer::Anonymous, slug, None).await;
        assert!(matches!(result, Err(DomainError::NotFound { entity_type: "category", .. })));
    }
}

#[tokio::test]
async fn test_own_profile_shows_everything() {
    let blog = Blog::new();
    let (anna, anna_viewer) = blog.user("anna").await;
    let (_, boris_viewer) = blog.user("boris").await;
    let closed = blog.category("closed", false).await;

    blog.public_post(&anna, "public").await;
    blog.post(&anna, PostInput::new("draft", "Text", blog.hours_ago(2)).unpublished())
        .await;
    blog.post(&anna, PostInput::new("scheduled", "Text", blog.now() + Duration::days(1)))
        .await;
    blog.post(&anna, PostInput::new("hidden", "Text", blog.hours_ago(3)).in_category(closed.id))
        .await;

    let own = blog.listing.profile_feed(&anna_viewer, "anna", None).await.unwrap();
    assert_eq!(own.profile.id, anna.id);
    assert_eq!(
        titles(&own.page.items),
        vec!["scheduled", "public", "draft", "hidden"]
    );

    let other = blog.listing.profile_feed(&boris_viewer, "anna", None).await.unwrap();
    assert_eq!(titles(&other.page.items), vec!["public"]);

    let anonymous = blog.listing.profile_feed(&Viewer::Anonymous, "anna", None).await.unwrap();
    assert_eq!(titles(&anonymous.page.items), vec!["public"]);
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() {
    let blog = Blog::new();
    let result = blog.listing.profile_feed(&Viewer::Anonymous, "ghost", None).await;
    assert!(matches!(result, Err(DomainError::NotFound { entity_type: "user", .. })));
}

#[tokio::test]
async fn test_list_posts_without_filter_returns_base_set() {
    let blog = Blog::new();
    let (anna, _) = blog.user("anna").await;
    blog.post(&anna, PostInput::new("draft", "Text", blog.hours_ago(1)).unpublished())
        .await;

    let options = QueryOptions {
        select_related: false,
        published_only: false,
        with_comment_count: false,
    };
    let page = blog
        .listing
        .list_posts(&Viewer::Anonymous, PostScope::All, options, None)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert!(page.items[0].relations.is_none());
    assert!(page.items[0].comment_count.is_none());
}

#[tokio::test]
async fn test_unpublished_detail_is_not_found_for_anonymous() {
    let blog = Blog::new();
    let (anna, _) = blog.user("anna").await;
    let draft = blog
        .post(&anna, PostInput::new("draft", "Text", blog.hours_ago(1)).unpublished())
        .await;

    let result = blog.listing.post_detail(&Viewer::Anonymous, draft.id).await;
    assert!(matches!(result, Err(DomainError::NotFound { entity_type: "post", .. })));

    let missing = blog.listing.post_detail(&Viewer::Anonymous, Uuid::new_v4()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { entity_type: "post", .. })));
}

#[tokio::test]
async fn test_author_sees_own_unpublished_detail() {
    let blog = Blog::new();
    let (anna, viewer) = blog.user("anna").await;
    let (boris, _) = blog.user("boris").await;
    let closed = blog.category("closed", false).await;
    let place = blog.location("Kazan").await;
    let draft = blog
        .post(
            &anna,
            PostInput::new("draft", "Full text", blog.now() + Duration::days(2))
                .in_category(closed.id)
                .at_location(place.id)
                .unpublished(),
        )
        .await;
    blog.comment(&draft, &boris, "early bird").await;

    let detail = blog.listing.post_detail(&viewer, draft.id).await.unwrap();

    assert_eq!(detail.post.post.text, "Full text");
    let relations = detail.post.relations.as_ref().unwrap();
    assert_eq!(relations.category.as_ref().unwrap().id, closed.id);
    assert_eq!(relations.location.as_ref().unwrap().name, "Kazan");
    assert_eq!(relations.author.as_ref().unwrap().id, anna.id);
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].author.as_ref().unwrap().username, "boris");
}

#[tokio::test]
async fn test_hidden_category_detail_is_not_found_for_others() {
    let blog = Blog::new();
    let (anna, _) = blog.user("anna").await;
    let (_, boris) = blog.user("boris").await;
    let closed = blog.category("closed", false).await;
    let post = blog
        .post(&anna, PostInput::new("hidden", "Text", blog.hours_ago(1)).in_category(closed.id))
        .await;

    let result = blog.listing.post_detail(&boris, post.id).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_detail_comments_oldest_first_and_count_is_stable() {
    let blog = Blog::new();
    let (anna, _) = blog.user("anna").await;
    let (boris, _) = blog.user("boris").await;
    let post = blog.public_post(&anna, "talk").await;
    blog.comment(&post, &boris, "first").await;
    blog.comment(&post, &anna, "second").await;
    blog.comment(&post, &boris, "third").await;

    let first = blog.listing.post_detail(&Viewer::Anonymous, post.id).await.unwrap();
    let second = blog.listing.post_detail(&Viewer::Anonymous, post.id).await.unwrap();

    let texts: Vec<&str> = first.comments.iter().map(|c| c.comment.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
    assert_eq!(first.post.comment_count, Some(3));
    assert_eq!(first.post.comment_count, second.post.comment_count);
}
