//! maud page renderers.
//!
//! Each module renders one page; `components` holds the shared shell, the
//! post card, pagination controls, and field-error display. Renderers are
//! pure functions from already-fetched data to `Markup`; handlers do all
//! querying.

pub mod components;
pub mod feed;
pub mod group;
pub mod login;
pub mod post;
pub mod post_form;
pub mod profile;

/// Author counters shown on the profile and post detail pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorStats {
    pub posts: i64,
    pub followers: i64,
    pub following: i64,
}
