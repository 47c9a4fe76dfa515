//! Group lookups.

use gazette_core::Group;
use sqlx::SqlitePool;

/// Fetch a group by its URL slug.
pub async fn fetch_by_slug(pool: &SqlitePool, slug: &str) -> sqlx::Result<Option<Group>> {
    sqlx::query_as::<_, Group>("SELECT id, title, slug, description FROM groups WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// List every group, for the post form's group selector.
pub async fn list_all(pool: &SqlitePool) -> sqlx::Result<Vec<Group>> {
    sqlx::query_as::<_, Group>("SELECT id, title, slug, description FROM groups ORDER BY title")
        .fetch_all(pool)
        .await
}

/// Create a group.
pub async fn create(
    pool: &SqlitePool,
    title: &str,
    slug: &str,
    description: &str,
) -> sqlx::Result<Group> {
    sqlx::query_as::<_, Group>(
        "INSERT INTO groups (title, slug, description) VALUES (?, ?, ?) \
         RETURNING id, title, slug, description",
    )
    .bind(title)
    .bind(slug)
    .bind(description)
    .fetch_one(pool)
    .await
}
