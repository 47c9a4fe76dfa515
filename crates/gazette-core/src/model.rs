//! Row types for the Gazette relational schema.
//!
//! These structs map 1:1 onto table rows (or small, stable joins) and derive
//! `sqlx::FromRow` so the query layer can fetch them directly. Rendering
//! never touches the database; it consumes these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account.
///
/// Identity (password hash, session issuance) is handled by the auth layer;
/// this row only carries what the pages need.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A named topical community posts may belong to.
///
/// The slug is the stable external identifier used in URLs and must be
/// unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A published post.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub text: String,
    /// Media-relative path of the attached image, if any.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
    pub group_id: Option<i64>,
}

/// A post joined with its author's username and (optional) group title/slug,
/// as every listing surface renders it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostView {
    pub id: i64,
    pub text: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
    pub author_username: String,
    pub group_id: Option<i64>,
    pub group_title: Option<String>,
    pub group_slug: Option<String>,
}

/// A comment on a post. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
    pub post_id: i64,
}

/// A comment joined with its author's username for the detail page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentView {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_username: String,
}

/// A directed follow edge: `user_id` follows `author_id`.
///
/// The schema enforces at most one edge per pair and rejects self-follows;
/// the handlers additionally treat both as silent no-ops.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Follow {
    pub id: i64,
    pub user_id: i64,
    pub author_id: i64,
}
