//! Listing pipeline: base query, relation loading, visibility filter,
//! comment counts, ordering, pagination.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Category, CommentRecord, PostRecord, PostRelations, User, Viewer};
use crate::error::DomainError;
use crate::pagination::{Page, Paginator};
use crate::policy::{can_view_post, requires_public_filter, visible_posts};
use crate::ports::{
    BaseRepository, CategoryRepository, Clock, CommentRepository, PostQuery, PostRepository,
    PostScope, Repositories, UserRepository,
};

/// What a listing loads and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Load author, category and location with each post.
    pub select_related: bool,
    /// Apply the visibility policy for the viewer.
    pub published_only: bool,
    pub with_comment_count: bool,
}

impl QueryOptions {
    /// Options used by every public feed.
    pub const FEED: Self = Self {
        select_related: true,
        published_only: true,
        with_comment_count: true,
    };
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::FEED
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryFeed {
    pub category: Category,
    pub page: Page<PostRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileFeed {
    pub profile: User,
    pub page: Page<PostRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: PostRecord,
    /// Oldest first.
    pub comments: Vec<CommentRecord>,
}

/// Read side of the platform.
#[derive(Clone)]
pub struct ListingService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
    paginator: Paginator,
}

impl ListingService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>, paginator: Paginator) -> Self {
        Self {
            repos,
            clock,
            paginator,
        }
    }

    /// The single listing function every feed goes through.
    ///
    /// Posts come back ordered by `pub_date`, newest first; equal dates keep
    /// insertion order.
    pub async fn list_posts(
        &self,
        viewer: &Viewer,
        scope: PostScope,
        options: QueryOptions,
        page: Option<&str>,
    ) -> Result<Page<PostRecord>, DomainError> {
        let owner = match scope {
            PostScope::Author(id) => Some(id),
            PostScope::All | PostScope::Category(_) => None,
        };
        let filtered = options.published_only && requires_public_filter(viewer, owner);

        let query = PostQuery {
            scope,
            // The category gate needs the attached category.
            with_relations: options.select_related || filtered,
            with_comment_count: options.with_comment_count,
        };
        tracing::debug!(?query, %viewer, filtered, "Listing posts");

        let mut records = self.repos.posts.fetch(query).await?;
        if options.published_only {
            records = visible_posts(viewer, owner, records, self.clock.now());
        }
        records.sort_by(|a, b| b.post.pub_date.cmp(&a.post.pub_date));

        Ok(self.paginator.get_page(records, page))
    }

    /// All publicly visible posts.
    pub async fn global_feed(
        &self,
        viewer: &Viewer,
        page: Option<&str>,
    ) -> Result<Page<PostRecord>, DomainError> {
        self.list_posts(viewer, PostScope::All, QueryOptions::FEED, page)
            .await
    }

    /// Publicly visible posts of a published category.
    pub async fn category_feed(
        &self,
        viewer: &Viewer,
        slug: &str,
        page: Option<&str>,
    ) -> Result<CategoryFeed, DomainError> {
        let category = self
            .repos
            .categories
            .find_by_slug(slug)
            .await?
            .filter(|c| c.is_published)
            .ok_or_else(|| DomainError::not_found("category", slug))?;

        let page = self
            .list_posts(viewer, PostScope::Category(category.id), QueryOptions::FEED, page)
            .await?;

        Ok(CategoryFeed { category, page })
    }

    /// Posts of one user. The user sees all of their own posts.
    pub async fn profile_feed(
        &self,
        viewer: &Viewer,
        username: &str,
        page: Option<&str>,
    ) -> Result<ProfileFeed, DomainError> {
        let profile = self
            .repos
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let page = self
            .list_posts(viewer, PostScope::Author(profile.id), QueryOptions::FEED, page)
            .await?;

        Ok(ProfileFeed { profile, page })
    }

    /// A single post with its comments. Hidden posts are reported exactly
    /// like missing ones.
    pub async fn post_detail(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
    ) -> Result<PostDetail, DomainError> {
        let not_found = || DomainError::not_found("post", post_id);

        let post = self
            .repos
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(not_found)?;

        let category = match post.category_id {
            Some(id) => self.repos.categories.find_by_id(id).await?,
            None => None,
        };
        if !can_view_post(viewer, &post, category.as_ref(), self.clock.now()) {
            tracing::debug!(%post_id, %viewer, "Post hidden from viewer");
            return Err(not_found());
        }

        let location = match post.location_id {
            Some(id) => self.repos.locations.find_by_id(id).await?,
            None => None,
        };

        let comments = self.repos.comments.find_by_post(post_id).await?;

        let mut author_ids: Vec<Uuid> = comments.iter().map(|c| c.author_id).collect();
        author_ids.push(post.author_id);
        author_ids.sort();
        author_ids.dedup();
        let authors: HashMap<Uuid, User> = self
            .repos
            .users
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let post_author = authors.get(&post.author_id).cloned();
        let comments: Vec<CommentRecord> = comments
            .into_iter()
            .map(|comment| CommentRecord {
                author: authors.get(&comment.author_id).cloned(),
                comment,
            })
            .collect();

        let record = PostRecord {
            comment_count: Some(comments.len() as u64),
            relations: Some(PostRelations {
                author: post_author,
                category,
                location,
            }),
            post,
        };

        Ok(PostDetail {
            post: record,
            comments,
        })
    }
}
