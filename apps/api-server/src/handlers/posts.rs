//! Feed, detail and post authoring handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_shared::dto::{
    CategoryFeedResponse, PageQuery, PostDetailResponse, PostRequest, ProfileFeedResponse,
};

use super::present;
use crate::middleware::auth::CurrentViewer;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    viewer: CurrentViewer,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .listing
        .global_feed(&viewer, query.page.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(present::page(page)))
}

/// GET /category/{slug}/
pub async fn category_posts(
    state: web::Data<AppState>,
    viewer: CurrentViewer,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state
        .listing
        .category_feed(&viewer, &slug, query.page.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(CategoryFeedResponse {
        category: present::category(&feed.category),
        posts: present::page(feed.page),
    }))
}

/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    viewer: CurrentViewer,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state
        .listing
        .profile_feed(&viewer, &username, query.page.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ProfileFeedResponse {
        profile: present::user(&feed.profile),
        posts: present::page(feed.page),
    }))
}

/// GET /posts/{post_id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    viewer: CurrentViewer,
    post_id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state.listing.post_detail(&viewer, *post_id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: present::post(detail.post),
        comments: detail.comments.into_iter().map(present::comment).collect(),
    }))
}

/// POST /posts/create/
pub async fn create_post(
    state: web::Data<AppState>,
    viewer: CurrentViewer,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let target = state
        .mutations
        .create_post(&viewer, present::post_input(body.into_inner()))
        .await?;

    Ok(present::redirect(&target, &state.login_url))
}

/// POST /posts/{post_id}/edit/
pub async fn edit_post(
    state: web::Data<AppState>,
    viewer: CurrentViewer,
    post_id: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let target = state
        .mutations
        .edit_post(&viewer, *post_id, present::post_input(body.into_inner()))
        .await?;

    Ok(present::redirect(&target, &state.login_url))
}

/// POST /posts/{post_id}/delete/
pub async fn delete_post(
    state: web::Data<AppState>,
    viewer: CurrentViewer,
    post_id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let target = state.mutations.delete_post(&viewer, *post_id).await?;

    Ok(present::redirect(&target, &state.login_url))
}
