//! API service routes

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{assets, middleware::require_session, state::AppState};

pub mod posts;
pub mod users;

/// Request body limit; post images travel base64-encoded in JSON bodies
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/users/follow/:id", post(users::follow_unfollow))
        .route("/api/users/update/:id", put(users::update_user))
        .route("/api/posts", post(posts::create_post))
        .route("/api/posts/:id", delete(posts::delete_post))
        .route("/api/posts/:id/replies", post(posts::create_reply))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/users/profile/:username", get(users::get_user_profile))
        .route("/api/users/signup", post(users::signup))
        .route("/api/users/login", post(users::login))
        .route("/api/users/logout", post(users::logout))
        .route("/api/posts/:id", get(posts::get_post))
        .merge(protected_routes)
        .fallback(assets::serve_client)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "ripple-api"
    }))
}
