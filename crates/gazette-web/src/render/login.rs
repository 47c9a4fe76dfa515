//! Login form page.

use maud::{Markup, html};

use super::components::page_shell;

/// Render the login form. `next` is carried through a hidden field so a
/// successful login returns to the page that required it; `error` is the
/// failure line for a rejected attempt.
pub fn login(site_name: &str, next: Option<&str>, error: Option<&str>) -> Markup {
    let body = html! {
        h1 class="group-title" { "Log in" }
        div class="group-head" {}
        form method="post" action="/auth/login" {
            @if let Some(message) = error {
                p class="field-error" { (message) }
            }
            label for="username" { "Username" }
            input id="username" type="text" name="username" required;
            label for="password" { "Password" }
            input id="password" type="password" name="password" required;
            @if let Some(next) = next {
                input type="hidden" name="next" value=(next);
            }
            button type="submit" { "Log in" }
        }
    };
    page_shell(site_name, "Log in", None, body)
}
