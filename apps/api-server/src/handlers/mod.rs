//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod present;
mod profile;

use actix_web::{HttpRequest, error::JsonPayloadError, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        // Listings
        .route("/", web::get().to(posts::index))
        .route("/category/{slug}/", web::get().to(posts::category_posts))
        .route("/profile/edit/", web::post().to(profile::edit_profile))
        .route("/profile/{username}/", web::get().to(posts::profile))
        // Posts
        .route("/posts/create/", web::post().to(posts::create_post))
        .route("/posts/{post_id}/", web::get().to(posts::post_detail))
        .route("/posts/{post_id}/edit/", web::post().to(posts::edit_post))
        .route("/posts/{post_id}/delete/", web::post().to(posts::delete_post))
        // Comments
        .route("/posts/{post_id}/comment/", web::post().to(comments::add_comment))
        .route(
            "/posts/{post_id}/edit_comment/{comment_id}/",
            web::post().to(comments::edit_comment),
        )
        .route(
            "/posts/{post_id}/delete_comment/{comment_id}/",
            web::post().to(comments::delete_comment),
        );
}

/// Malformed JSON bodies answer with a problem document instead of plain text.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    })
}
