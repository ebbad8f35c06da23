//! Post and reply models and related request/response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// A reply nested inside a post
///
/// Owned exclusively by its parent post; stored in the post's `replies`
/// JSONB array in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Reply {
    /// Build a reply authored by the given user
    pub fn new(author: &User, text: String) -> Self {
        Reply {
            id: Uuid::new_v4(),
            user_id: author.id,
            username: author.username.clone(),
            text,
            created_at: Utc::now(),
        }
    }
}

/// Post entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub posted_by: Uuid,
    pub text: String,
    pub img: Option<String>,
    pub replies: Vec<Reply>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wrapper for responses that return a post
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub post: Post,
}

/// Request for post creation
///
/// `postedBy` and `text` are required but kept optional here so their
/// absence surfaces as the contract's 400 message rather than a
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePostRequest {
    pub posted_by: Option<String>,
    pub text: Option<String>,
    pub img: Option<String>,
}

/// Request for reply creation
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateReplyRequest {
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_wire_names() {
        let post = Post {
            id: Uuid::new_v4(),
            posted_by: Uuid::new_v4(),
            text: "hello".to_string(),
            img: None,
            replies: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json: serde_json::Value = serde_json::to_value(&post).unwrap();

        assert_eq!(json["_id"], post.id.to_string());
        assert_eq!(json["postedBy"], post.posted_by.to_string());
        assert!(json.get("createdAt").is_some());
        assert!(json["replies"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_reply_roundtrip() {
        let reply = Reply {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
            text: "nice post".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.contains("\"_id\""));
        assert!(json.contains("\"userId\""));

        let back: Reply = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reply);
    }

    #[test]
    fn test_create_post_request_missing_fields() {
        let req: CreatePostRequest = serde_json::from_str("{}").unwrap();
        assert!(req.posted_by.is_none());
        assert!(req.text.is_none());

        let req: CreatePostRequest =
            serde_json::from_str(r#"{"postedBy": "abc", "text": "hi"}"#).unwrap();
        assert_eq!(req.posted_by.as_deref(), Some("abc"));
        assert_eq!(req.text.as_deref(), Some("hi"));
    }
}
