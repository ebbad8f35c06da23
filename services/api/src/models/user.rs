//! User model and related request/response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::patch::Patch;

/// User entity as stored
///
/// Deliberately not `Serialize`: everything leaving the service goes through
/// [`UserProfile`] or [`AuthResponse`], which never carry the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_pic: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user creation payload
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    /// Plain password; hashed by the repository before storage
    pub password: String,
}

/// Public profile as returned by profile reads
///
/// Excludes the password hash and the last-update timestamp; the follow
/// graph is included as id arrays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub profile_pic: Option<String>,
    pub bio: Option<String>,
    pub followers: Vec<Uuid>,
    pub following: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn from_parts(user: User, followers: Vec<Uuid>, following: Vec<Uuid>) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            profile_pic: user.profile_pic,
            bio: user.bio,
            followers,
            following,
            created_at: user.created_at,
        }
    }
}

/// Request for user signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for signup and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub username: String,
}

impl From<&User> for AuthResponse {
    fn from(user: &User) -> Self {
        AuthResponse {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
        }
    }
}

/// Partial-update request for a profile
///
/// `name`/`email`/`username`/`password` cannot be cleared: absent keeps the
/// stored value, present values are validated. `profilePic` and `bio` are
/// tri-state and may be cleared with an explicit null.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub profile_pic: Patch<String>,
    pub bio: Patch<String>,
}

/// Response for profile updates
#[derive(Debug, Serialize)]
pub struct UpdatedProfileResponse {
    pub message: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            profile_pic: None,
            bio: Some("hi".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_never_contains_password() {
        let user = sample_user();
        let profile = UserProfile::from_parts(user, vec![], vec![]);
        let json = serde_json::to_string(&profile).unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("updatedAt"));
    }

    #[test]
    fn test_profile_wire_names() {
        let user = sample_user();
        let id = user.id;
        let profile = UserProfile::from_parts(user, vec![], vec![]);
        let json: serde_json::Value = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["_id"], id.to_string());
        assert!(json.get("profilePic").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json["followers"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_auth_response_shape() {
        let user = sample_user();
        let json: serde_json::Value =
            serde_json::to_value(AuthResponse::from(&user)).unwrap();

        assert_eq!(json["_id"], user.id.to_string());
        assert_eq!(json["username"], "alice");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_update_request_tri_state() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"name": "Bob", "bio": null}"#).unwrap();

        assert_eq!(req.name.as_deref(), Some("Bob"));
        assert!(req.email.is_none());
        assert_eq!(req.bio, Patch::Clear);
        assert!(req.profile_pic.is_missing());
    }
}
