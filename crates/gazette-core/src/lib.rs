//! Core types and shared utilities for the Gazette blogging service.
//!
//! This crate provides:
//! - Row types for the relational schema (users, groups, posts, comments,
//!   follows) shared between the query layer and the page renderers
//! - The clamping paginator used by every list view

pub mod model;
pub mod page;

// ═══════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════

/// Posts (and comments’ parent posts) per page on every list view.
pub const PAGE_SIZE: i64 = 10;

pub use model::{Comment, CommentView, Follow, Group, Post, PostView, User};
pub use page::{Page, paginate};
