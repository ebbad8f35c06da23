//! Post repository for database operations

use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{Post, Reply};

const POST_COLUMNS: &str = "id, posted_by, text, img, replies, created_at, updated_at";

fn post_from_row(row: &PgRow) -> Result<Post, sqlx::Error> {
    let replies: Json<Vec<Reply>> = row.try_get("replies")?;

    Ok(Post {
        id: row.try_get("id")?,
        posted_by: row.try_get("posted_by")?,
        text: row.try_get("text")?,
        img: row.try_get("img")?,
        replies: replies.0,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Post repository
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new post with an empty reply list
    pub async fn create(&self, posted_by: Uuid, text: &str, img: Option<&str>) -> ApiResult<Post> {
        info!("Creating post for user: {}", posted_by);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO posts (posted_by, text, img)
            VALUES ($1, $2, $3)
            RETURNING {POST_COLUMNS}
            "#,
        ))
        .bind(posted_by)
        .bind(text)
        .bind(img)
        .fetch_one(&self.pool)
        .await?;

        Ok(post_from_row(&row)?)
    }

    /// Find a post by ID
    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Post>> {
        let row = sqlx::query(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(post_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete a post; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Append a reply to a post's reply array, preserving insertion order
    ///
    /// Returns the updated post, or None if the post does not exist.
    pub async fn add_reply(&self, post_id: Uuid, reply: &Reply) -> ApiResult<Option<Post>> {
        info!("Adding reply to post: {}", post_id);

        let row = sqlx::query(&format!(
            r#"
            UPDATE posts
            SET replies = replies || jsonb_build_array($2::jsonb), updated_at = now()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#,
        ))
        .bind(post_id)
        .bind(Json(reply))
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(post_from_row(&row)?)),
            None => Ok(None),
        }
    }
}
