//! Shared HTML components used across all pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use gazette_core::{Page, PostView, User};
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::forms::FieldErrors;

/// Inline CSS for all pages.
///
/// Flat design, no external assets: spacing and subtle background shifts
/// for hierarchy.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#fafafa;--fg:#111;--fg2:#555;--fg3:#999;--accent:#0b6e4f;--surface:#fff;--border:rgba(11,110,79,.18);--mono:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:680px;width:100%;flex:1}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto;border-radius:6px}
.nav{max-width:680px;width:100%;display:flex;align-items:center;gap:1rem;margin-bottom:1.5rem}
.nav-title{font-weight:700;font-size:1.2rem;color:var(--fg)}
.nav-spacer{flex:1}
.nav a{font-size:.9rem}
.card{padding:1.25rem;border:1px solid var(--border);border-radius:10px;background:var(--surface);margin-bottom:1rem}
.card-meta{display:flex;gap:.6rem;align-items:baseline;font-size:.85rem;color:var(--fg3);margin-bottom:.5rem;flex-wrap:wrap}
.card-meta a{font-weight:600}
.card-text{white-space:pre-wrap;word-break:break-word}
.card-image{margin-top:.75rem}
.pager{display:flex;gap:1rem;justify-content:center;align-items:center;margin:1.5rem 0;font-size:.9rem}
.pager-info{color:var(--fg3)}
.profile-head{margin-bottom:1.5rem}
.profile-name{font-size:1.6rem;font-weight:700;letter-spacing:-.02em}
.profile-meta{display:flex;gap:1.25rem;flex-wrap:wrap;margin-top:.5rem;font-size:.9rem;color:var(--fg2)}
.group-head{margin-bottom:1.5rem}
.group-title{font-size:1.5rem;font-weight:700}
.group-desc{color:var(--fg2);margin-top:.25rem}
form{display:flex;flex-direction:column;gap:.75rem}
label{font-size:.85rem;font-weight:600;color:var(--fg2)}
textarea,input[type=text],input[type=password],select{font:inherit;padding:.5rem .65rem;border:1px solid var(--border);border-radius:6px;background:var(--surface);width:100%}
textarea{min-height:7rem;resize:vertical}
button{font:inherit;font-weight:600;color:#fff;background:var(--accent);border:none;border-radius:6px;padding:.55rem 1.1rem;cursor:pointer;align-self:flex-start}
.field-error{color:#b3261e;font-size:.85rem}
.comments{margin-top:2rem}
.comments h2{font-size:1.1rem;margin-bottom:.75rem}
.comment{padding:.65rem 0;border-top:1px solid var(--border);font-size:.95rem}
.comment-meta{font-size:.8rem;color:var(--fg3)}
.empty{color:var(--fg3);text-align:center;padding:2rem 0}
.error-page{display:flex;flex-direction:column;align-items:center;justify-content:center;min-height:50vh;gap:.75rem;text-align:center}
.follow-btn{display:inline-block;margin-top:.5rem}
"#;

/// Full page shell: doctype, head with inline CSS, nav reflecting login
/// state, the page body, and a footer.
pub fn page_shell(site_name: &str, title: &str, viewer: Option<&User>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " — " (site_name) }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                nav class="nav" {
                    a class="nav-title" href="/" { (site_name) }
                    div class="nav-spacer" {}
                    @if let Some(user) = viewer {
                        a href="/follow" { "My feed" }
                        a href="/new" { "New post" }
                        a href={ "/" (user.username) } { (user.username) }
                        a href="/auth/logout" { "Log out" }
                    } @else {
                        a href="/auth/login" { "Log in" }
                    }
                }
                main { (body) }
                footer class="footer" {}
            }
        }
    }
}

/// One post in a listing: author, date, optional group, text, optional image.
pub fn post_card(post: &PostView) -> Markup {
    html! {
        article class="card" {
            div class="card-meta" {
                a href={ "/" (post.author_username) } { (post.author_username) }
                a href={ "/" (post.author_username) "/" (post.id) } {
                    (post.created_at.format("%Y-%m-%d %H:%M"))
                }
                @if let (Some(title), Some(slug)) = (&post.group_title, &post.group_slug) {
                    a href={ "/group/" (slug) } { (title) }
                }
            }
            p class="card-text" { (post.text) }
            @if let Some(image) = &post.image {
                div class="card-image" {
                    img src={ "/media/" (image) } alt="attached image";
                }
            }
        }
    }
}

/// A page of post cards with an empty-state fallback.
pub fn post_list(page: &Page<PostView>) -> Markup {
    html! {
        @if page.items.is_empty() {
            p class="empty" { "No posts yet." }
        }
        @for post in &page.items {
            (post_card(post))
        }
    }
}

/// Pagination controls. `base` is the page's path; the page number goes in
/// the `page` query parameter.
pub fn pager<T>(page: &Page<T>, base: &str) -> Markup {
    html! {
        @if page.pages > 1 {
            div class="pager" {
                @if page.has_previous() {
                    a href={ (base) "?page=" ((page.number - 1)) } { "← newer" }
                }
                span class="pager-info" { "page " (page.number) " of " (page.pages) }
                @if page.has_next() {
                    a href={ (base) "?page=" ((page.number + 1)) } { "older →" }
                }
            }
        }
    }
}

/// Inline error text for one form field, if it has an error.
pub fn field_error(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.get(field) {
            p class="field-error" { (message) }
        }
    }
}
