mod common;

use blog_core::DomainError;
use blog_core::domain::{NewCategory, NewLocation, PostInput};
use blog_core::ports::{BaseRepository, CategoryRepository};

use common::Blog;

#[tokio::test]
async fn test_malformed_category_is_rejected_without_write() {
    let blog = Blog::new();

    let result = blog
        .catalog
        .create_category(NewCategory::new("", "", "bad slug!"))
        .await;

    let Err(DomainError::Validation(errors)) = result else {
        panic!("expected validation error");
    };
    assert!(errors.has("title"));
    assert!(errors.has("slug"));
    assert!(blog.repos.categories.find_by_slug("bad slug!").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_slug_is_a_field_error() {
    let blog = Blog::new();
    blog.catalog
        .create_category(NewCategory::new("Travel", "Trips", "travel"))
        .await
        .unwrap();

    let result = blog
        .catalog
        .create_category(NewCategory::new("Travel again", "", "travel"))
        .await;

    assert!(matches!(result, Err(DomainError::Validation(ref e)) if e.has("slug")));
}

#[tokio::test]
async fn test_update_category_keeps_own_slug() {
    let blog = Blog::new();
    let travel = blog
        .catalog
        .create_category(NewCategory::new("Travel", "", "travel"))
        .await
        .unwrap();
    blog.catalog
        .create_category(NewCategory::new("Food", "", "food"))
        .await
        .unwrap();

    let mut input = NewCategory::new("Travel notes", "Trips", "travel");
    input.is_published = false;
    let updated = blog.catalog.update_category(travel.id, input).await.unwrap();
    assert_eq!(updated.title, "Travel notes");
    assert!(!updated.is_published);

    let taken = blog
        .catalog
        .update_category(travel.id, NewCategory::new("Travel", "", "food"))
        .await;
    assert!(matches!(taken, Err(DomainError::Validation(ref e)) if e.has("slug")));

    let bad = blog
        .catalog
        .update_category(travel.id, NewCategory::new("Travel", "", "no/slash"))
        .await;
    assert!(matches!(bad, Err(DomainError::Validation(ref e)) if e.has("slug")));
}

#[tokio::test]
async fn test_location_name_limits() {
    let blog = Blog::new();

    let empty = blog.catalog.create_location(NewLocation::new("  ")).await;
    assert!(matches!(empty, Err(DomainError::Validation(ref e)) if e.has("name")));

    let long = blog
        .catalog
        .create_location(NewLocation::new("x".repeat(257)))
        .await;
    assert!(matches!(long, Err(DomainError::Validation(ref e)) if e.has("name")));

    let kazan = blog
        .catalog
        .create_location(NewLocation::new("Kazan"))
        .await
        .unwrap();
    let renamed = blog
        .catalog
        .update_location(kazan.id, NewLocation::new("Kazan, Tatarstan"))
        .await
        .unwrap();
    assert_eq!(renamed.name, "Kazan, Tatarstan");
}

#[tokio::test]
async fn test_catalog_deletes_detach_posts() {
    let blog = Blog::new();
    let (anna, _) = blog.user("anna").await;
    let travel = blog
        .catalog
        .create_category(NewCategory::new("Travel", "", "travel"))
        .await
        .unwrap();
    let kazan = blog
        .catalog
        .create_location(NewLocation::new("Kazan"))
        .await
        .unwrap();
    let post = blog
        .post(
            &anna,
            PostInput::new("Trip", "Text", blog.hours_ago(1))
                .in_category(travel.id)
                .at_location(kazan.id),
        )
        .await;

    blog.catalog.delete_category(travel.id).await.unwrap();
    blog.catalog.delete_location(kazan.id).await.unwrap();

    let post = blog.repos.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(post.category_id, None);
    assert_eq!(post.location_id, None);

    let missing = blog.catalog.delete_category(travel.id).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}
