//! Comment queries. Comments are immutable once created.

use chrono::Utc;
use gazette_core::{Comment, CommentView};
use sqlx::SqlitePool;

/// All comments on a post, oldest first.
pub async fn list_for_post(pool: &SqlitePool, post_id: i64) -> sqlx::Result<Vec<CommentView>> {
    sqlx::query_as::<_, CommentView>(
        "SELECT c.id, c.text, c.created_at, u.username AS author_username \
         FROM comments c \
         JOIN users u ON u.id = c.author_id \
         WHERE c.post_id = ? \
         ORDER BY c.created_at, c.id",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Create a comment.
pub async fn create(
    pool: &SqlitePool,
    post_id: i64,
    author_id: i64,
    text: &str,
) -> sqlx::Result<Comment> {
    sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (text, created_at, author_id, post_id) \
         VALUES (?, ?, ?, ?) \
         RETURNING id, text, created_at, author_id, post_id",
    )
    .bind(text)
    .bind(Utc::now())
    .bind(author_id)
    .bind(post_id)
    .fetch_one(pool)
    .await
}

/// Count comments on a post.
pub async fn count_for_post(pool: &SqlitePool, post_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await
}
