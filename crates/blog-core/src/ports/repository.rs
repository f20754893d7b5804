use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Comment, Location, Post, PostRecord, User};
use crate::error::RepoError;

/// Generic repository trait defining standard persistence operations.
///
/// Deletion is entity-specific because each entity has its own cascade
/// or detach rules.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Store a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Replace an existing entity. Fails with `RepoError::NotFound` if it
    /// no longer exists.
    async fn update(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;

    /// Delete a user with their posts and every comment that depended on
    /// them, in one transaction.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Category repository. Slugs are unique; duplicates fail with
/// `RepoError::Constraint`.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError>;

    /// Delete a category and detach it from its posts, in one transaction.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait LocationRepository: BaseRepository<Location, Uuid> {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Location>, RepoError>;

    /// Delete a location and detach it from its posts, in one transaction.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Which posts a listing starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScope {
    All,
    Category(Uuid),
    Author(Uuid),
}

/// Base query for the listing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    pub scope: PostScope,
    /// Load author, category and location with each post.
    pub with_relations: bool,
    /// Count comments per post.
    pub with_comment_count: bool,
}

#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts in `query.scope`, in insertion order.
    async fn fetch(&self, query: PostQuery) -> Result<Vec<PostRecord>, RepoError>;

    /// Delete a post and all of its comments, in one transaction.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments of a post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Handles to every repository of the entity store.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    /// Use one store for every repository.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + CategoryRepository
            + LocationRepository
            + PostRepository
            + CommentRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            categories: store.clone(),
            locations: store.clone(),
            posts: store.clone(),
            comments: store,
        }
    }
}
