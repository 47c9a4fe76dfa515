//! Author profile page.

use gazette_core::{Page, PostView, User};
use maud::{Markup, html};

use super::AuthorStats;
use super::components::{page_shell, pager, post_list};

/// Render an author's profile: counters, follow state for the viewer, and
/// the author's posts.
pub fn profile(
    site_name: &str,
    viewer: Option<&User>,
    author: &User,
    stats: AuthorStats,
    following: Option<bool>,
    page: &Page<PostView>,
) -> Markup {
    let body = html! {
        div class="profile-head" {
            h1 class="profile-name" { (author.username) }
            div class="profile-meta" {
                span { "Posts: " (stats.posts) }
                span { "Followers: " (stats.followers) }
                span { "Following: " (stats.following) }
            }
            // Follow controls only make sense for a logged-in viewer looking
            // at someone else's profile.
            @if let Some(following) = following {
                @if viewer.is_some_and(|v| v.id != author.id) {
                    @if following {
                        a class="follow-btn" href={ "/" (author.username) "/unfollow" } {
                            "Unfollow"
                        }
                    } @else {
                        a class="follow-btn" href={ "/" (author.username) "/follow" } {
                            "Follow"
                        }
                    }
                }
            }
        }
        (post_list(page))
        (pager(page, &format!("/{}", author.username)))
    };
    page_shell(site_name, &author.username, viewer, body)
}
