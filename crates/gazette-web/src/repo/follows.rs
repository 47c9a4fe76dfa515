//! Follow-edge queries.
//!
//! The schema carries `UNIQUE (user_id, author_id)` and
//! `CHECK (user_id <> author_id)`; these functions stay idempotent on top of
//! that so repeated requests never surface constraint errors.

use sqlx::SqlitePool;

/// Idempotent create; returns true if a new edge was inserted.
///
/// Callers must reject self-follows before calling (the CHECK would fire).
pub async fn follow(pool: &SqlitePool, user_id: i64, author_id: i64) -> sqlx::Result<bool> {
    let inserted = sqlx::query_as::<_, (i64,)>(
        "INSERT INTO follows (user_id, author_id) VALUES (?, ?) \
         ON CONFLICT (user_id, author_id) DO NOTHING \
         RETURNING id",
    )
    .bind(user_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

/// Idempotent delete; returns true if an edge was removed.
pub async fn unfollow(pool: &SqlitePool, user_id: i64, author_id: i64) -> sqlx::Result<bool> {
    let affected = sqlx::query("DELETE FROM follows WHERE user_id = ? AND author_id = ?")
        .bind(user_id)
        .bind(author_id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(affected > 0)
}

/// Does `user_id` currently follow `author_id`?
pub async fn is_following(pool: &SqlitePool, user_id: i64, author_id: i64) -> sqlx::Result<bool> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM follows WHERE user_id = ? AND author_id = ?")
            .bind(user_id)
            .bind(author_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}

/// How many users follow this author.
pub async fn follower_count(pool: &SqlitePool, author_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await
}

/// How many authors this user follows.
pub async fn following_count(pool: &SqlitePool, user_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
}
