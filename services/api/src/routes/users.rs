//! User endpoints: profiles, signup/login/logout, follow graph, updates

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extract::AppJson,
    middleware::CurrentUser,
    models::{
        AuthResponse, LoginRequest, NewUser, SignupRequest, UpdateUserRequest,
        UpdatedProfileResponse, User, UserProfile,
    },
    repositories::user::hash_password,
    state::AppState,
    validation::{
        validate_email, validate_name, validate_password, validate_text, validate_username,
    },
};

async fn load_profile(state: &AppState, user: User) -> ApiResult<UserProfile> {
    let followers = state.user_repository.followers_of(user.id).await?;
    let following = state.user_repository.following_of(user.id).await?;
    Ok(UserProfile::from_parts(user, followers, following))
}

/// Profile read by username
///
/// The response never carries the password hash or the last-update
/// timestamp; the follow graph is included as id arrays.
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_repository
        .find_by_username(&username)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(load_profile(&state, user).await?))
}

/// User signup endpoint
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_name(&payload.name).map_err(ApiError::Validation)?;
    validate_username(&payload.username).map_err(ApiError::Validation)?;
    validate_email(&payload.email).map_err(ApiError::Validation)?;
    validate_password(&payload.password).map_err(ApiError::Validation)?;

    if state
        .user_repository
        .username_or_email_taken(&payload.username, &payload.email)
        .await?
    {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let user = state
        .user_repository
        .create(&NewUser {
            name: payload.name,
            username: payload.username,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    info!("User signed up: {}", user.username);

    let token = state.sessions.issue(user.id)?;
    let jar = jar.add(state.sessions.session_cookie(token));

    Ok((StatusCode::CREATED, jar, Json(AuthResponse::from(&user))))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_repository
        .find_by_username(&payload.username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !state
        .user_repository
        .verify_password(&user, &payload.password)?
    {
        return Err(ApiError::InvalidCredentials);
    }

    info!("User logged in: {}", user.username);

    let token = state.sessions.issue(user.id)?;
    let jar = jar.add(state.sessions.session_cookie(token));

    Ok((StatusCode::CREATED, jar, Json(AuthResponse::from(&user))))
}

/// Logout endpoint; clears the session cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(state.sessions.clear_cookie());
    (jar, Json(json!({"message": "User logged out successfully"})))
}

/// Follow/unfollow toggle
///
/// The follow edge is a single row, so both users' graphs change together
/// or not at all.
pub async fn follow_unfollow(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let target_id: Uuid = id
        .parse()
        .map_err(|_| ApiError::Validation("Invalid user id".to_string()))?;

    if target_id == current.0 {
        return Err(ApiError::Validation(
            "You cannot follow/unfollow yourself".to_string(),
        ));
    }

    let target = state
        .user_repository
        .find_by_id(target_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    let caller = state
        .user_repository
        .find_by_id(current.0)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let message = if state
        .user_repository
        .is_following(caller.id, target.id)
        .await?
    {
        state.user_repository.unfollow(caller.id, target.id).await?;
        info!("User {} unfollowed {}", caller.username, target.username);
        "User unfollowed successfully"
    } else {
        state.user_repository.follow(caller.id, target.id).await?;
        info!("User {} followed {}", caller.username, target.username);
        "User followed successfully"
    };

    Ok(Json(json!({"message": message})))
}

/// Profile update endpoint
///
/// Only the profile's owner may update it. Absent fields keep their stored
/// values; `profilePic` and `bio` may be cleared with an explicit null.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let target_id: Uuid = id
        .parse()
        .map_err(|_| ApiError::Validation("Invalid user id".to_string()))?;

    if target_id != current.0 {
        return Err(ApiError::Forbidden(
            "You cannot update another user's profile".to_string(),
        ));
    }

    let mut user = state
        .user_repository
        .find_by_id(current.0)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    if let Some(name) = payload.name {
        validate_name(&name).map_err(ApiError::Validation)?;
        user.name = name;
    }
    if let Some(email) = payload.email {
        validate_email(&email).map_err(ApiError::Validation)?;
        user.email = email;
    }
    if let Some(username) = payload.username {
        validate_username(&username).map_err(ApiError::Validation)?;
        user.username = username;
    }
    if let Some(password) = payload.password {
        validate_password(&password).map_err(ApiError::Validation)?;
        user.password_hash = hash_password(&password)?;
    }
    if let crate::models::Patch::Set(pic) = &payload.profile_pic {
        if pic.len() > 2048 {
            return Err(ApiError::Validation(
                "Profile picture URL is too long".to_string(),
            ));
        }
    }
    if let crate::models::Patch::Set(bio) = &payload.bio {
        validate_text(bio).map_err(ApiError::Validation)?;
    }
    payload.profile_pic.apply(&mut user.profile_pic);
    payload.bio.apply(&mut user.bio);

    // Username/email collisions surface through the unique constraints.
    let user = state.user_repository.update(&user).await?;

    info!("User profile updated: {}", user.username);

    let profile = load_profile(&state, user).await?;

    Ok(Json(UpdatedProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: profile,
    }))
}
