//! In-memory entity store - used when no database is configured, and by
//! the scenario tests.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Category, Comment, Location, Post, PostRecord, PostRelations, User};
use blog_core::error::{RepoError, ValidationErrors};
use blog_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, LocationRepository, PostQuery,
    PostRepository, PostScope, UserRepository,
};

/// Every table lives behind one lock, so each mutation (cascades included)
/// happens under a single write guard.
#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    locations: Vec<Location>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl Tables {
    fn check_post_refs(&self, post: &Post) -> Result<(), RepoError> {
        if !self.users.iter().any(|u| u.id == post.author_id) {
            return Err(RepoError::Constraint("post author does not exist".to_string()));
        }
        if let Some(id) = post.category_id {
            if !self.categories.iter().any(|c| c.id == id) {
                return Err(RepoError::Constraint("post category does not exist".to_string()));
            }
        }
        if let Some(id) = post.location_id {
            if !self.locations.iter().any(|l| l.id == id) {
                return Err(RepoError::Constraint("post location does not exist".to_string()));
            }
        }
        Ok(())
    }
}

/// In-memory store using plain vectors behind an async RwLock.
///
/// Vectors keep insertion order, which is the base order of every listing.
/// Note: Data is lost on process restart.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn replace<T>(rows: &mut [T], entity: T, same: impl Fn(&T) -> bool) -> Result<(), RepoError> {
    let slot = rows.iter_mut().find(|r| same(r)).ok_or(RepoError::NotFound)?;
    *slot = entity;
    Ok(())
}

/// Field rules the store enforces like table checks.
fn rejected(errors: ValidationErrors) -> RepoError {
    RepoError::Constraint(errors.to_string())
}

fn by_ids<T: Clone>(rows: &[T], ids: &[Uuid], id_of: impl Fn(&T) -> Uuid) -> Vec<T> {
    rows.iter().filter(|r| ids.contains(&id_of(r))).cloned().collect()
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("username already exists".to_string()));
        }
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|u| u.username == user.username && u.id != user.id)
        {
            return Err(RepoError::Constraint("username already exists".to_string()));
        }
        let id = user.id;
        replace(&mut tables.users, user.clone(), |u| u.id == id)?;
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(by_ids(&tables.users, ids, |u| u.id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(RepoError::NotFound);
        }

        let owned_posts: HashSet<Uuid> = tables
            .posts
            .iter()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        tables
            .comments
            .retain(|c| c.author_id != id && !owned_posts.contains(&c.post_id));
        tables.posts.retain(|p| p.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, category: Category) -> Result<Category, RepoError> {
        category.validate().map_err(rejected)?;
        let mut tables = self.tables.write().await;
        if tables.categories.iter().any(|c| c.slug == category.slug) {
            return Err(RepoError::Constraint(format!(
                "category slug '{}' already exists",
                category.slug
            )));
        }
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> Result<Category, RepoError> {
        category.validate().map_err(rejected)?;
        let mut tables = self.tables.write().await;
        if tables
            .categories
            .iter()
            .any(|c| c.slug == category.slug && c.id != category.id)
        {
            return Err(RepoError::Constraint(format!(
                "category slug '{}' already exists",
                category.slug
            )));
        }
        let id = category.id;
        replace(&mut tables.categories, category.clone(), |c| c.id == id)?;
        Ok(category)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(by_ids(&tables.categories, ids, |c| c.id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        if tables.categories.len() == before {
            return Err(RepoError::NotFound);
        }
        for post in tables.posts.iter_mut().filter(|p| p.category_id == Some(id)) {
            post.category_id = None;
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Location, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.locations.iter().find(|l| l.id == id).cloned())
    }

    async fn insert(&self, location: Location) -> Result<Location, RepoError> {
        location.validate().map_err(rejected)?;
        let mut tables = self.tables.write().await;
        tables.locations.push(location.clone());
        Ok(location)
    }

    async fn update(&self, location: Location) -> Result<Location, RepoError> {
        location.validate().map_err(rejected)?;
        let mut tables = self.tables.write().await;
        let id = location.id;
        replace(&mut tables.locations, location.clone(), |l| l.id == id)?;
        Ok(location)
    }
}

#[async_trait]
impl LocationRepository for InMemoryStore {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Location>, RepoError> {
        let tables = self.tables.read().await;
        Ok(by_ids(&tables.locations, ids, |l| l.id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.locations.len();
        tables.locations.retain(|l| l.id != id);
        if tables.locations.len() == before {
            return Err(RepoError::NotFound);
        }
        for post in tables.posts.iter_mut().filter(|p| p.location_id == Some(id)) {
            post.location_id = None;
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        tables.check_post_refs(&post)?;
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::NotFound);
        }
        tables.check_post_refs(&post)?;
        let id = post.id;
        replace(&mut tables.posts, post.clone(), |p| p.id == id)?;
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn fetch(&self, query: PostQuery) -> Result<Vec<PostRecord>, RepoError> {
        let tables = self.tables.read().await;

        let in_scope = |post: &&Post| match query.scope {
            PostScope::All => true,
            PostScope::Category(id) => post.category_id == Some(id),
            PostScope::Author(id) => post.author_id == id,
        };

        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        if query.with_comment_count {
            for comment in &tables.comments {
                *counts.entry(comment.post_id).or_default() += 1;
            }
        }

        let records = tables
            .posts
            .iter()
            .filter(in_scope)
            .map(|post| PostRecord {
                relations: query.with_relations.then(|| PostRelations {
                    author: tables.users.iter().find(|u| u.id == post.author_id).cloned(),
                    category: post
                        .category_id
                        .and_then(|id| tables.categories.iter().find(|c| c.id == id).cloned()),
                    location: post
                        .location_id
                        .and_then(|id| tables.locations.iter().find(|l| l.id == id).cloned()),
                }),
                comment_count: query
                    .with_comment_count
                    .then(|| counts.get(&post.id).copied().unwrap_or(0)),
                post: post.clone(),
            })
            .collect();

        Ok(records)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        if tables.posts.len() == before {
            return Err(RepoError::NotFound);
        }
        tables.comments.retain(|c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.iter().any(|p| p.id == comment.post_id) {
            return Err(RepoError::Constraint("comment post does not exist".to_string()));
        }
        if !tables.users.iter().any(|u| u.id == comment.author_id) {
            return Err(RepoError::Constraint("comment author does not exist".to_string()));
        }
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        let id = comment.id;
        replace(&mut tables.comments, comment.clone(), |c| c.id == id)?;
        Ok(comment)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        if tables.comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
