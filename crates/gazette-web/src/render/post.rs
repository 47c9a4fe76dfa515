//! Post detail page: the post, author counters, comments, comment form.

use gazette_core::{CommentView, PostView, User};
use maud::{Markup, html};

use super::AuthorStats;
use super::components::{field_error, page_shell, post_card};
use crate::forms::{CommentForm, FieldErrors};

/// Render the post detail page.
///
/// `form`/`errors` carry a rejected comment submission back into the form;
/// a plain GET passes defaults.
pub fn post_view(
    site_name: &str,
    viewer: Option<&User>,
    post: &PostView,
    stats: AuthorStats,
    comments: &[CommentView],
    form: &CommentForm,
    errors: &FieldErrors,
) -> Markup {
    let title = format!("{} — post {}", post.author_username, post.id);
    let body = html! {
        div class="profile-head" {
            h1 class="profile-name" { (post.author_username) }
            div class="profile-meta" {
                span { "Posts: " (stats.posts) }
                span { "Followers: " (stats.followers) }
                span { "Following: " (stats.following) }
            }
        }
        (post_card(post))
        @if viewer.is_some_and(|v| v.id == post.author_id) {
            p {
                a href={ "/" (post.author_username) "/" (post.id) "/edit" } { "Edit post" }
            }
        }
        section class="comments" {
            h2 { "Comments (" (comments.len()) ")" }
            @for comment in comments {
                div class="comment" {
                    div class="comment-meta" {
                        (comment.author_username) " · "
                        (comment.created_at.format("%Y-%m-%d %H:%M"))
                    }
                    p { (comment.text) }
                }
            }
            @if viewer.is_some() {
                form method="post"
                     action={ "/" (post.author_username) "/" (post.id) "/comment" } {
                    label for="text" { "Add a comment" }
                    textarea id="text" name="text" { (form.text) }
                    (field_error(errors, "text"))
                    button type="submit" { "Publish" }
                }
            } @else {
                p class="empty" {
                    a href="/auth/login" { "Log in" } " to comment."
                }
            }
        }
    };
    page_shell(site_name, &title, viewer, body)
}
