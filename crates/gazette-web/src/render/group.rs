//! Group feed page.

use gazette_core::{Group, Page, PostView, User};
use maud::{Markup, html};

use super::components::{page_shell, pager, post_list};

/// Render a group's feed.
pub fn group_posts(
    site_name: &str,
    viewer: Option<&User>,
    group: &Group,
    page: &Page<PostView>,
) -> Markup {
    let body = html! {
        div class="group-head" {
            h1 class="group-title" { (group.title) }
            p class="group-desc" { (group.description) }
        }
        (post_list(page))
        (pager(page, &format!("/group/{}", group.slug)))
    };
    page_shell(site_name, &group.title, viewer, body)
}
