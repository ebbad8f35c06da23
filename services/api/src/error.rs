//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
///
/// Every handler converts its failures into one of these variants at the
/// boundary; the wire shape is always `{"message": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, malformed, or oversized input
    #[error("{0}")]
    Validation(String),

    /// Bad username/password combination (reported as 400)
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No valid session, or acting on another user's resource
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed to touch this resource
    #[error("{0}")]
    Forbidden(String),

    /// Missing user or post
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Duplicate username or email (reported as 400)
    #[error("{0}")]
    Conflict(String),

    /// Database error
    #[error(transparent)]
    Database(#[from] common::error::DatabaseError),

    /// Anything else that escaped
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // Pre-checks report duplicates first; this closes the race window.
            if db_err.is_unique_violation() {
                return ApiError::Conflict("User already exists".to_string());
            }
        }
        ApiError::Database(common::error::DatabaseError::Query(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::InvalidCredentials | ApiError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::Validation("bad".into()).into_response().status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::InvalidCredentials.into_response().status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Unauthorized.into_response().status(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::Forbidden("no".into()).into_response().status(),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::NotFound("User").into_response().status(),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Conflict("User already exists".into())
                    .into_response()
                    .status(),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (got, want) in cases {
            assert_eq!(got, want);
        }
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::NotFound("Post").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Post not found");
    }
}
