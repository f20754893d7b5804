use actix_web::{HttpResponse, web};

use blog_shared::dto::ProfileRequest;

use super::present;
use crate::middleware::auth::CurrentViewer;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /profile/edit/
pub async fn edit_profile(
    state: web::Data<AppState>,
    viewer: CurrentViewer,
    body: web::Json<ProfileRequest>,
) -> AppResult<HttpResponse> {
    let target = state
        .mutations
        .edit_profile(&viewer, present::profile_input(body.into_inner()))
        .await?;

    Ok(present::redirect(&target, &state.login_url))
}
