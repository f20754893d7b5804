//! Shared fixture: the services wired to an in-memory store and a clock
//! the test controls.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use blog_core::domain::{Category, Comment, Location, Post, PostInput, User, Viewer};
use blog_core::pagination::Paginator;
use blog_core::ports::{BaseRepository, Clock, Repositories};
use blog_core::services::{CatalogService, ListingService, MutationService};
use blog_infra::InMemoryStore;

pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub struct Blog {
    pub repos: Repositories,
    pub clock: Arc<ManualClock>,
    pub listing: ListingService,
    pub mutations: MutationService,
    pub catalog: CatalogService,
}

impl Blog {
    pub fn new() -> Self {
        Self::with_page_size(10)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        let repos = Repositories::from_store(Arc::new(InMemoryStore::new()));
        let clock = Arc::new(ManualClock(Mutex::new(base_time())));
        let listing = ListingService::new(repos.clone(), clock.clone(), Paginator::new(page_size));
        let mutations = MutationService::new(repos.clone(), clock.clone());
        let catalog = CatalogService::new(repos.clone());
        Self {
            repos,
            clock,
            listing,
            mutations,
            catalog,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn hours_ago(&self, hours: i64) -> DateTime<Utc> {
        self.now() - Duration::hours(hours)
    }

    pub async fn user(&self, username: &str) -> (User, Viewer) {
        let user = self
            .repos
            .users
            .insert(User::new(username, format!("{username}@example.com")))
            .await
            .unwrap();
        let viewer = Viewer::user(user.id, &user.username);
        (user, viewer)
    }

    pub async fn category(&self, slug: &str, is_published: bool) -> Category {
        let mut category = Category::new(slug.to_uppercase(), "", slug);
        category.is_published = is_published;
        self.repos.categories.insert(category).await.unwrap()
    }

    pub async fn location(&self, name: &str) -> Location {
        self.repos.locations.insert(Location::new(name)).await.unwrap()
    }

    pub async fn post(&self, author: &User, input: PostInput) -> Post {
        self.repos
            .posts
            .insert(Post::new(author.id, input))
            .await
            .unwrap()
    }

    /// A published post with no category, an hour old.
    pub async fn public_post(&self, author: &User, title: &str) -> Post {
        self.post(author, PostInput::new(title, "Text", self.hours_ago(1)))
            .await
    }

    pub async fn comment(&self, post: &Post, author: &User, text: &str) -> Comment {
        self.repos
            .comments
            .insert(Comment::new(post.id, author.id, text))
            .await
            .unwrap()
    }
}
