//! SQLite query layer.
//!
//! All queries are point lookups, small paged scans, or single-statement
//! writes; each write runs in its own implicit transaction. Handlers convert
//! `sqlx::Error` into [`crate::error::WebError`] with `?`.

pub mod comments;
pub mod follows;
pub mod groups;
pub mod posts;
pub mod sessions;
pub mod users;
