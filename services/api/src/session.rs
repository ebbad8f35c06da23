//! Session tokens bound to a user id
//!
//! A session is a signed HS256 token carrying the user id and an expiry,
//! set as an HTTP-only cookie on signup/login and cleared on logout. Nothing
//! is persisted server-side beyond the signing secret.

use anyhow::Result;
use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "jwt";

/// Session token configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Secret used to sign and verify tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 15 days)
    pub token_expiry: u64,
}

impl SessionConfig {
    /// Create a new SessionConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: signing secret (required)
    /// - `JWT_TOKEN_EXPIRY`: token lifetime in seconds (default: 1296000)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "1296000".to_string()) // 15 days
            .parse()
            .unwrap_or(1_296_000);

        Ok(SessionConfig {
            secret,
            token_expiry,
        })
    }
}

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Signs and verifies session tokens and builds their carrier cookies
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl SessionService {
    /// Initialize a new session service
    pub fn new(config: &SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        SessionService {
            encoding_key,
            decoding_key,
            validation,
            token_expiry: config.token_expiry,
        }
    }

    /// Issue a signed token for a user
    pub fn issue(&self, user_id: Uuid) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.token_expiry,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token and return the user id it is bound to
    pub fn verify(&self, token: &str) -> Result<Uuid> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims.sub)
    }

    /// Build the HTTP-only cookie carrying a session token
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .max_age(time::Duration::seconds(self.token_expiry as i64))
            .build()
    }

    /// Build the cookie shape used to clear a session
    pub fn clear_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> SessionService {
        SessionService::new(&SessionConfig {
            secret: "test-secret".to_string(),
            token_expiry: 3600,
        })
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id).unwrap();
        let verified = service.verify(&token).unwrap();

        assert_eq!(verified, user_id);
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let service = test_service();
        let other = SessionService::new(&SessionConfig {
            secret: "other-secret".to_string(),
            token_expiry: 3600,
        });

        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = test_service();

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let service = test_service();
        assert!(service.verify("not-a-token").is_err());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let service = test_service();
        let cookie = service.session_cookie("abc".to_string());

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert!(cookie.max_age().is_some());
    }

    #[test]
    fn test_clear_cookie_is_empty() {
        let service = test_service();
        let cookie = service.clear_cookie();

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
    }
}
