//! ripple API service
//!
//! A small social-media backend: users sign up, follow and unfollow each
//! other, and create short text/image posts with nested replies. Sessions
//! are signed HS256 tokens carried in an HTTP-only cookie; storage is
//! PostgreSQL. A minimal single-page client is embedded and served as a
//! fallback.

pub mod assets;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod state;
pub mod validation;
