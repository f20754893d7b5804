//! Viewer extraction from bearer access tokens.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};
use std::ops::Deref;
use std::sync::Arc;

use blog_core::domain::Viewer;
use blog_core::ports::{AuthError, TokenService};

/// The viewer making the request.
///
/// A request without an `Authorization` header is anonymous. A header that
/// is present but carries a bad or expired token is rejected with 401.
/// ```ignore
/// async fn feed(viewer: CurrentViewer) -> impl Responder {
///     format!("Hello, {}!", *viewer)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentViewer(pub Viewer);

impl Deref for CurrentViewer {
    type Target = Viewer;

    fn deref(&self) -> &Viewer {
        &self.0
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use blog_shared::ErrorResponse;

        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your access token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

fn extract_viewer(req: &HttpRequest) -> Result<Viewer, AuthError> {
    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(Viewer::Anonymous);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    // Parse "Bearer <token>"
    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    let Some(token_service) = req.app_data::<actix_web::web::Data<Arc<dyn TokenService>>>()
    else {
        tracing::error!("TokenService not found in app data");
        return Err(AuthError::InvalidToken(
            "Server configuration error".to_string(),
        ));
    };

    token_service.validate_token(token).map(Viewer::from)
}

impl FromRequest for CurrentViewer {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            extract_viewer(req)
                .map(CurrentViewer)
                .map_err(|e| {
                    tracing::debug!(error = %e, "Rejected access token");
                    AuthenticationError(e)
                }),
        )
    }
}
