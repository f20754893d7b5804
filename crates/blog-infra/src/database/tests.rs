use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostQuery, PostRepository, PostScope,
};

use crate::database::entity::{category, comment, post};
use crate::database::postgres_repo::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
};

fn post_model(id: Uuid, author_id: Uuid, title: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        author_id,
        title: title.to_owned(),
        text: "Content".to_owned(),
        pub_date: now.into(),
        category_id: None,
        location_id: None,
        image: None,
        is_published: true,
        created_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(post_id, author_id, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.author_id, author_id);
}

#[tokio::test]
async fn test_find_category_by_slug() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![category::Model {
            id: Uuid::new_v4(),
            title: "Travel".to_owned(),
            description: "Trips".to_owned(),
            slug: "travel".to_owned(),
            is_published: false,
            created_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);

    let category = repo.find_by_slug("travel").await.unwrap().unwrap();
    assert_eq!(category.slug, "travel");
    assert!(!category.is_published);
}

#[tokio::test]
async fn test_fetch_without_relations_keeps_store_order() {
    let author_id = Uuid::new_v4();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            post_model(first, author_id, "First"),
            post_model(second, author_id, "Second"),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let records = repo
        .fetch(PostQuery {
            scope: PostScope::Author(author_id),
            with_relations: false,
            with_comment_count: false,
        })
        .await
        .unwrap();

    let ids: Vec<Uuid> = records.iter().map(|r| r.post.id).collect();
    assert_eq!(ids, vec![first, second]);
    assert!(records.iter().all(|r| r.relations.is_none()));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            // Comments of the post.
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            // The post itself.
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = PostRepository::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_comments_with_equal_timestamps_have_fixed_order() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let created_at = Utc::now();
    let model = |text: &str| comment::Model {
        id: Uuid::new_v4(),
        post_id,
        author_id,
        text: text.to_owned(),
        is_published: true,
        created_at: created_at.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model("first"), model("second")]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comments = repo.find_by_post(post_id).await.unwrap();
    assert_eq!(comments.len(), 2);

    assert_eq!(
        repo.db.into_transaction_log(),
        vec![Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT "comments"."id", "comments"."post_id", "comments"."author_id", "comments"."text", "comments"."is_published", "comments"."created_at" FROM "comments" WHERE "comments"."post_id" = $1 ORDER BY "comments"."created_at" ASC, "comments"."id" ASC"#,
            [post_id.into()],
        )]
    );
}
