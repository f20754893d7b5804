//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create or edit a post. Any author supplied by the client is
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
}

/// Request to create or edit a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// Request to edit the caller's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// `?page=` query parameter. Kept as text: unparsable values fall back to
/// the first page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub title: String,
    pub description: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author: Option<UserResponse>,
    pub category: Option<CategoryResponse>,
    pub location: Option<LocationResponse>,
    pub image: Option<String>,
    pub is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub author: Option<UserResponse>,
    pub created_at: DateTime<Utc>,
}

/// One page of a listing with its pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub results: Vec<T>,
    pub page: usize,
    pub num_pages: usize,
    pub count: usize,
    pub next: Option<usize>,
    pub previous: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFeedResponse {
    pub category: CategoryResponse,
    pub posts: PageResponse<PostResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileFeedResponse {
    pub profile: UserResponse,
    pub posts: PageResponse<PostResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}
