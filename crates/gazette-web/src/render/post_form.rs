//! New / edit post form page.

use gazette_core::{Group, User};
use maud::{Markup, html};

use super::components::{field_error, page_shell};
use crate::forms::{FieldErrors, PostForm};

/// Render the post form, empty or carrying a rejected submission.
///
/// `action` is where the form posts back to (`/new` or the edit URL);
/// `heading` distinguishes the two flows.
pub fn post_form(
    site_name: &str,
    viewer: &User,
    heading: &str,
    action: &str,
    groups: &[Group],
    form: &PostForm,
    errors: &FieldErrors,
) -> Markup {
    let body = html! {
        h1 class="group-title" { (heading) }
        div class="group-head" {}
        form method="post" action=(action) enctype="multipart/form-data" {
            label for="text" { "Text" }
            textarea id="text" name="text" required { (form.text) }
            (field_error(errors, "text"))

            label for="group" { "Group" }
            select id="group" name="group" {
                option value="" { "no group" }
                @for group in groups {
                    @if form.group == group.id.to_string() {
                        option value=(group.id) selected { (group.title) }
                    } @else {
                        option value=(group.id) { (group.title) }
                    }
                }
            }
            (field_error(errors, "group"))

            label for="image" { "Image (png, jpg, gif)" }
            input id="image" type="file" name="image" accept="image/*";
            (field_error(errors, "image"))

            button type="submit" { "Publish" }
        }
    };
    page_shell(site_name, heading, Some(viewer), body)
}
