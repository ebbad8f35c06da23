//! Post endpoints: create/read/delete and replies

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extract::AppJson,
    middleware::CurrentUser,
    models::{CreatePostRequest, CreateReplyRequest, PostResponse, Reply},
    state::AppState,
    validation::validate_text,
};

fn parse_post_id(id: &str) -> ApiResult<Uuid> {
    // A malformed id cannot name a post.
    id.parse().map_err(|_| ApiError::NotFound("Post"))
}

/// Post read by id
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let post = state
        .post_repository
        .find_by_id(parse_post_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    Ok(Json(PostResponse { post }))
}

/// Post creation endpoint
///
/// The declared author must match the authenticated caller.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppJson(payload): AppJson<CreatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    let required = || ApiError::Validation("Postedby and text fields are required".to_string());

    let posted_by = payload.posted_by.ok_or_else(required)?;
    let text = match payload.text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(required()),
    };

    let posted_by: Uuid = posted_by.parse().map_err(|_| ApiError::NotFound("User"))?;

    let author = state
        .user_repository
        .find_by_id(posted_by)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    if author.id != current.0 {
        return Err(ApiError::Unauthorized);
    }

    validate_text(&text).map_err(ApiError::Validation)?;

    let post = state
        .post_repository
        .create(author.id, &text, payload.img.as_deref())
        .await?;

    info!("Post created: {} by {}", post.id, author.username);

    Ok(Json(json!({"message": "Post created successfully"})))
}

/// Post deletion endpoint; owner only
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let post = state
        .post_repository
        .find_by_id(parse_post_id(&id)?)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    if post.posted_by != current.0 {
        return Err(ApiError::Unauthorized);
    }

    if !state.post_repository.delete(post.id).await? {
        return Err(ApiError::NotFound("Post"));
    }

    info!("Post deleted: {}", post.id);

    Ok(Json(json!({"message": "Post deleted successfully"})))
}

/// Reply creation endpoint
///
/// Appends a reply to the post's reply list and returns the updated post.
pub async fn create_reply(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<CreateReplyRequest>,
) -> ApiResult<impl IntoResponse> {
    let post_id = parse_post_id(&id)?;

    let text = payload
        .text
        .ok_or_else(|| ApiError::Validation("Text is required".to_string()))?;
    validate_text(&text).map_err(ApiError::Validation)?;

    let author = state
        .user_repository
        .find_by_id(current.0)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let reply = Reply::new(&author, text);
    let post = state
        .post_repository
        .add_reply(post_id, &reply)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    info!("Reply added to post: {}", post.id);

    Ok(Json(PostResponse { post }))
}
