//! User identification middleware
//!
//! Sign-in happens upstream; the gateway forwards the verified user id in the
//! `X-User-Id` header.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};

use crate::error::{ApiError, Result};

pub const USER_ID_HEADER: &str = "x-user-id";

/// Identified user stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// Extracts the caller's user id from the request headers
pub async fn auth_middleware(mut request: Request<Body>, next: Next) -> Result<Response> {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))?
        .to_string();

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}
