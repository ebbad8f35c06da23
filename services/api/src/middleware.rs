//! Middleware for session validation and authentication

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;
use uuid::Uuid;

use crate::{error::ApiError, session::SESSION_COOKIE, state::AppState};

/// Authenticated caller, inserted into request extensions by
/// [`require_session`]
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

/// Extract and verify the session cookie
///
/// Rejects with 401 when the cookie is absent, malformed, or expired;
/// otherwise stores the caller's id for handlers downstream.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .ok_or(ApiError::Unauthorized)?;

    let user_id = state.sessions.verify(&token).map_err(|e| {
        debug!("Session verification failed: {}", e);
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(CurrentUser(user_id));

    Ok(next.run(req).await)
}
