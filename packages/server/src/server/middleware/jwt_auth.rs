use crate::common::UserId;
use crate::domains::auth::JwtService;
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Authenticated caller identity resolved from the session token
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
}

/// Session authentication middleware
///
/// Extracts the bearer token from the Authorization header, verifies it, and
/// adds AuthUser to request extensions. A missing or invalid token is not an
/// error here - the request continues anonymously and only protected fields
/// reject it.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match extract_auth_user(&request, &jwt_service) {
        Some(user) => {
            debug!(user_id = %user.user_id, "Authenticated request");
            request.extensions_mut().insert(user);
        }
        None => debug!("No valid session token"),
    }

    next.run(request).await
}

/// Extract and verify the session token from a request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Accept both "Bearer <token>" and a raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let user_id = jwt_service.verify_token(token)?;

    Some(AuthUser { user_id })
}
