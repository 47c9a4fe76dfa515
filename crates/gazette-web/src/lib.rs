//! Gazette - server-rendered social blogging service.
//!
//! Users publish posts (optionally grouped into topical communities, with an
//! optional attached image), comment on each other's posts, and follow
//! authors to get a personalized feed. All pages are rendered server-side
//! with maud; the home feed is additionally served from a short-TTL
//! in-process cache.
//!
//! # Architecture
//!
//! - **AppState**: shared state (SQLite pool, configuration, page cache,
//!   media store)
//! - **auth**: session-cookie extractors and the login/logout flow
//! - **forms**: multipart/urlencoded parsing and pure validation
//! - **repo**: the sqlx query layer
//! - **render**: maud page renderers
//! - **routes**: one handler per route

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod forms;
pub mod media;
pub mod render;
pub mod repo;
mod routes;
mod state;

pub use self::config::Config;
pub use self::error::WebError;
pub use self::routes::router;
pub use self::state::AppState;

/// Embedded schema migrations, applied at startup (and by tests).
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
