//! API service models

pub mod patch;
pub mod post;
pub mod user;

// Re-export for convenience
pub use patch::Patch;
pub use post::{CreatePostRequest, CreateReplyRequest, Post, PostResponse, Reply};
pub use user::{
    AuthResponse, LoginRequest, NewUser, SignupRequest, UpdateUserRequest, UpdatedProfileResponse,
    User, UserProfile,
};
