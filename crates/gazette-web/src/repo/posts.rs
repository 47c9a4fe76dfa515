//! Post queries: the four listing surfaces, point lookups, and writes.
//!
//! Every listing orders newest-first (`created_at DESC, id DESC`; the id
//! tie-break keeps posts created within the same second stable).

use chrono::Utc;
use gazette_core::{Post, PostView};
use sqlx::SqlitePool;

const VIEW_COLUMNS: &str = "p.id, p.text, p.image, p.created_at, p.author_id, \
     u.username AS author_username, p.group_id, g.title AS group_title, g.slug AS group_slug";

/// Count all posts.
pub async fn count_all(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
}

/// One page of the home feed.
pub async fn list_all(pool: &SqlitePool, limit: i64, offset: i64) -> sqlx::Result<Vec<PostView>> {
    sqlx::query_as::<_, PostView>(&format!(
        "SELECT {VIEW_COLUMNS} FROM posts p \
         JOIN users u ON u.id = p.author_id \
         LEFT JOIN groups g ON g.id = p.group_id \
         ORDER BY p.created_at DESC, p.id DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count one author's posts.
pub async fn count_by_author(pool: &SqlitePool, author_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await
}

/// One page of an author's posts.
pub async fn list_by_author(
    pool: &SqlitePool,
    author_id: i64,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<PostView>> {
    sqlx::query_as::<_, PostView>(&format!(
        "SELECT {VIEW_COLUMNS} FROM posts p \
         JOIN users u ON u.id = p.author_id \
         LEFT JOIN groups g ON g.id = p.group_id \
         WHERE p.author_id = ? \
         ORDER BY p.created_at DESC, p.id DESC LIMIT ? OFFSET ?"
    ))
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count a group's posts.
pub async fn count_by_group(pool: &SqlitePool, group_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE group_id = ?")
        .bind(group_id)
        .fetch_one(pool)
        .await
}

/// One page of a group's posts.
pub async fn list_by_group(
    pool: &SqlitePool,
    group_id: i64,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<PostView>> {
    sqlx::query_as::<_, PostView>(&format!(
        "SELECT {VIEW_COLUMNS} FROM posts p \
         JOIN users u ON u.id = p.author_id \
         LEFT JOIN groups g ON g.id = p.group_id \
         WHERE p.group_id = ? \
         ORDER BY p.created_at DESC, p.id DESC LIMIT ? OFFSET ?"
    ))
    .bind(group_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count posts by authors the given user follows.
pub async fn count_followed(pool: &SqlitePool, user_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM posts p \
         JOIN follows f ON f.author_id = p.author_id \
         WHERE f.user_id = ?",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// One page of the personalized follow feed.
pub async fn list_followed(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<PostView>> {
    sqlx::query_as::<_, PostView>(&format!(
        "SELECT {VIEW_COLUMNS} FROM posts p \
         JOIN users u ON u.id = p.author_id \
         LEFT JOIN groups g ON g.id = p.group_id \
         JOIN follows f ON f.author_id = p.author_id \
         WHERE f.user_id = ? \
         ORDER BY p.created_at DESC, p.id DESC LIMIT ? OFFSET ?"
    ))
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Fetch a single post as the detail page renders it.
pub async fn fetch_view(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<PostView>> {
    sqlx::query_as::<_, PostView>(&format!(
        "SELECT {VIEW_COLUMNS} FROM posts p \
         JOIN users u ON u.id = p.author_id \
         LEFT JOIN groups g ON g.id = p.group_id \
         WHERE p.id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Fetch a raw post row.
pub async fn fetch(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Post>> {
    sqlx::query_as::<_, Post>(
        "SELECT id, text, image, created_at, author_id, group_id FROM posts WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Create a post.
pub async fn create(
    pool: &SqlitePool,
    text: &str,
    image: Option<&str>,
    author_id: i64,
    group_id: Option<i64>,
) -> sqlx::Result<Post> {
    sqlx::query_as::<_, Post>(
        "INSERT INTO posts (text, image, created_at, author_id, group_id) \
         VALUES (?, ?, ?, ?, ?) \
         RETURNING id, text, image, created_at, author_id, group_id",
    )
    .bind(text)
    .bind(image)
    .bind(Utc::now())
    .bind(author_id)
    .bind(group_id)
    .fetch_one(pool)
    .await
}

/// Update a post's text, group, and (when a new upload replaced it) image.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    text: &str,
    group_id: Option<i64>,
    image: Option<&str>,
) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE posts SET text = ?, group_id = ?, image = COALESCE(?, image) WHERE id = ?",
    )
    .bind(text)
    .bind(group_id)
    .bind(image)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}
