//! Post publishing, detail, editing, and comments.

use axum::Form;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use maud::Markup;

use super::{author_stats, resolve_post};
use crate::auth::{RequireUser, Viewer};
use crate::error::WebError;
use crate::forms::{CommentForm, FieldErrors, GROUP_ERROR, PostForm, ValidPostForm};
use crate::render;
use crate::repo;
use crate::state::AppState;

/// `GET /new` — empty post form.
pub async fn new_post_page(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Markup, WebError> {
    let groups = repo::groups::list_all(&state.db).await?;
    Ok(render::post_form::post_form(
        &state.config.site_name,
        &user,
        "New post",
        "/new",
        &groups,
        &PostForm::default(),
        &FieldErrors::default(),
    ))
}

/// `POST /new` — validate and publish.
///
/// Success persists exactly one post with the current user as author and
/// redirects to the home feed. Failure re-renders the form with field
/// errors and HTTP 200; nothing is persisted.
pub async fn new_post_submit(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let form = PostForm::from_multipart(multipart)
        .await
        .map_err(WebError::Internal)?;

    let valid = match validate_against_groups(&state, form).await? {
        Ok(valid) => valid,
        Err((form, errors)) => {
            let markup = render_form(&state, &user, "New post", "/new", &form, &errors).await?;
            return Ok(markup.into_response());
        }
    };

    let image = match &valid.image {
        Some(image) => Some(state.media.save(image).await.map_err(WebError::Internal)?),
        None => None,
    };

    let post = repo::posts::create(
        &state.db,
        &valid.text,
        image.as_deref(),
        user.id,
        valid.group_id,
    )
    .await?;
    tracing::info!(post_id = post.id, author = %user.username, "post published");

    Ok(Redirect::to("/").into_response())
}

/// `GET /{username}/{post_id}` — post detail with comments and the comment
/// form.
pub async fn post_view(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path((username, post_id)): Path<(String, String)>,
) -> Result<Markup, WebError> {
    let post = resolve_post(&state, &username, &post_id).await?;
    let stats = author_stats(&state, post.author_id).await?;
    let comments = repo::comments::list_for_post(&state.db, post.id).await?;

    Ok(render::post::post_view(
        &state.config.site_name,
        viewer.as_ref(),
        &post,
        stats,
        &comments,
        &CommentForm::default(),
        &FieldErrors::default(),
    ))
}

/// `GET /{username}/{post_id}/edit` — edit form, prefilled.
///
/// A non-author lands here via a guessed URL; they are redirected to the
/// post detail page without an error.
pub async fn post_edit_page(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((username, post_id)): Path<(String, String)>,
) -> Result<Response, WebError> {
    let post = resolve_post(&state, &username, &post_id).await?;

    if post.author_id != user.id {
        return Ok(redirect_to_post(&username, post.id).into_response());
    }

    let form = PostForm {
        text: post.text.clone(),
        group: post.group_id.map(|id| id.to_string()).unwrap_or_default(),
        image: None,
    };
    let action = format!("/{username}/{}/edit", post.id);
    let markup = render_form(&state, &user, "Edit post", &action, &form, &FieldErrors::default())
        .await?;
    Ok(markup.into_response())
}

/// `POST /{username}/{post_id}/edit` — validate and update.
///
/// Same silent redirect for non-authors; a new upload replaces the stored
/// image, no upload keeps it.
pub async fn post_edit_submit(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((username, post_id)): Path<(String, String)>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let post = resolve_post(&state, &username, &post_id).await?;

    if post.author_id != user.id {
        return Ok(redirect_to_post(&username, post.id).into_response());
    }

    let form = PostForm::from_multipart(multipart)
        .await
        .map_err(WebError::Internal)?;

    let valid = match validate_against_groups(&state, form).await? {
        Ok(valid) => valid,
        Err((form, errors)) => {
            let action = format!("/{username}/{}/edit", post.id);
            let markup = render_form(&state, &user, "Edit post", &action, &form, &errors).await?;
            return Ok(markup.into_response());
        }
    };

    let image = match &valid.image {
        Some(image) => Some(state.media.save(image).await.map_err(WebError::Internal)?),
        None => None,
    };

    repo::posts::update(
        &state.db,
        post.id,
        &valid.text,
        valid.group_id,
        image.as_deref(),
    )
    .await?;
    tracing::info!(post_id = post.id, author = %user.username, "post edited");

    // A replacing upload supersedes the stored file.
    if image.is_some() {
        if let Some(old) = &post.image {
            if let Err(error) = state.media.remove(old).await {
                tracing::warn!(%error, file = %old, "could not remove replaced upload");
            }
        }
    }

    Ok(redirect_to_post(&username, post.id).into_response())
}

/// `POST /{username}/{post_id}/comment` — add a comment.
///
/// Unauthenticated requests never reach this body: `RequireUser` answers
/// them with the login redirect, so no comment is created.
pub async fn add_comment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((username, post_id)): Path<(String, String)>,
    Form(form): Form<CommentForm>,
) -> Result<Response, WebError> {
    let post = resolve_post(&state, &username, &post_id).await?;

    let text = match form.validate() {
        Ok(text) => text,
        Err(errors) => {
            // Re-render the detail page with the rejected form, HTTP 200.
            let stats = author_stats(&state, post.author_id).await?;
            let comments = repo::comments::list_for_post(&state.db, post.id).await?;
            let markup = render::post::post_view(
                &state.config.site_name,
                Some(&user),
                &post,
                stats,
                &comments,
                &form,
                &errors,
            );
            return Ok(markup.into_response());
        }
    };

    let comment = repo::comments::create(&state.db, post.id, user.id, text).await?;
    tracing::info!(comment_id = comment.id, post_id = post.id, "comment added");

    Ok(redirect_to_post(&username, post.id).into_response())
}

fn redirect_to_post(username: &str, post_id: i64) -> Redirect {
    Redirect::to(&format!("/{username}/{post_id}"))
}

/// Run pure form validation, then confirm a selected group actually exists.
async fn validate_against_groups(
    state: &AppState,
    form: PostForm,
) -> Result<Result<ValidPostForm, (PostForm, FieldErrors)>, WebError> {
    let outcome = match form.validate() {
        Ok(valid) => {
            if let Some(group_id) = valid.group_id {
                let known = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM groups WHERE id = ?")
                    .bind(group_id)
                    .fetch_one(&state.db)
                    .await?;
                if known == 0 {
                    let mut errors = FieldErrors::default();
                    errors.push("group", GROUP_ERROR);
                    let form = PostForm {
                        text: valid.text,
                        group: group_id.to_string(),
                        image: None,
                    };
                    return Ok(Err((form, errors)));
                }
            }
            Ok(valid)
        }
        Err(rejected) => Err(rejected),
    };
    Ok(outcome)
}

/// Render the post form with the group selector populated.
async fn render_form(
    state: &AppState,
    user: &gazette_core::User,
    heading: &str,
    action: &str,
    form: &PostForm,
    errors: &FieldErrors,
) -> Result<Markup, WebError> {
    let groups = repo::groups::list_all(&state.db).await?;
    Ok(render::post_form::post_form(
        &state.config.site_name,
        user,
        heading,
        action,
        &groups,
        form,
        errors,
    ))
}
