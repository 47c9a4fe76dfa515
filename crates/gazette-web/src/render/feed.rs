//! Home feed and follow feed pages.

use gazette_core::{Page, PostView, User};
use maud::{Markup, html};

use super::components::{page_shell, pager, post_list};

/// Render the cacheable fragment of the home feed: post list plus pager.
/// Nothing in here may depend on who is looking.
pub fn index_body(page: &Page<PostView>) -> Markup {
    html! {
        (post_list(page))
        (pager(page, "/"))
    }
}

/// Wrap a home-feed fragment in the per-request page chrome.
pub fn index(site_name: &str, viewer: Option<&User>, body: Markup) -> Markup {
    page_shell(site_name, "Latest posts", viewer, body)
}

/// Render the personalized follow feed.
pub fn follow_index(site_name: &str, viewer: &User, page: &Page<PostView>) -> Markup {
    let body = html! {
        h1 class="group-title" { "Posts from authors you follow" }
        div class="group-head" {}
        (post_list(page))
        (pager(page, "/follow"))
    };
    page_shell(site_name, "My feed", Some(viewer), body)
}
