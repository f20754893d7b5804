//! Comment handlers. The target post always comes from the path.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_shared::dto::CommentRequest;

use super::present;
use crate::middleware::auth::CurrentViewer;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /posts/{post_id}/comment/
pub async fn add_comment(
    state: web::Data<AppState>,
    viewer: CurrentViewer,
    post_id: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let target = state
        .mutations
        .create_comment(&viewer, *post_id, present::comment_input(body.into_inner()))
        .await?;

    Ok(present::redirect(&target, &state.login_url))
}

/// POST /posts/{post_id}/edit_comment/{comment_id}/
pub async fn edit_comment(
    state: web::Data<AppState>,
    viewer: CurrentViewer,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let target = state
        .mutations
        .edit_comment(
            &viewer,
            post_id,
            comment_id,
            present::comment_input(body.into_inner()),
        )
        .await?;

    Ok(present::redirect(&target, &state.login_url))
}

/// POST /posts/{post_id}/delete_comment/{comment_id}/
pub async fn delete_comment(
    state: web::Data<AppState>,
    viewer: CurrentViewer,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let target = state
        .mutations
        .delete_comment(&viewer, post_id, comment_id)
        .await?;

    Ok(present::redirect(&target, &state.login_url))
}
