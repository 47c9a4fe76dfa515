//! Session token storage backing the auth cookie.

use chrono::Utc;
use gazette_core::User;
use sqlx::SqlitePool;

/// Store a new session token for a user.
pub async fn create(pool: &SqlitePool, token: &str, user_id: i64) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(token)
        .bind(user_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    Ok(())
}

/// Resolve a session token to its user, if the session exists.
pub async fn fetch_user(pool: &SqlitePool, token: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT u.id, u.username, u.email, u.password_hash, u.created_at \
         FROM sessions s \
         JOIN users u ON u.id = s.user_id \
         WHERE s.token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Delete a session (logout). Missing tokens are not an error.
pub async fn delete(pool: &SqlitePool, token: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}
