//! Application state shared across handlers

use sqlx::PgPool;

use crate::repositories::{PostRepository, UserRepository};
use crate::session::SessionService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repository: UserRepository,
    pub post_repository: PostRepository,
    pub sessions: SessionService,
}

impl AppState {
    pub fn new(db_pool: PgPool, sessions: SessionService) -> Self {
        AppState {
            user_repository: UserRepository::new(db_pool.clone()),
            post_repository: PostRepository::new(db_pool.clone()),
            db_pool,
            sessions,
        }
    }
}
