//! Route definitions and shared handler helpers.
//!
//! ## Routes
//!
//! - `GET /` - home feed (cached)
//! - `GET /health` - health check (JSON)
//! - `GET|POST /new` - publish a post
//! - `GET /follow` - personalized feed
//! - `GET /group/{slug}` - group feed
//! - `GET|POST /auth/login`, `GET /auth/logout` - sessions
//! - `GET /{username}` - profile
//! - `GET /{username}/follow`, `GET /{username}/unfollow` - follow edges
//! - `GET /{username}/{post_id}` - post detail
//! - `GET|POST /{username}/{post_id}/edit` - edit (author only)
//! - `POST /{username}/{post_id}/comment` - add a comment
//! - `GET /media/...` - uploaded images
//! - anything else - fixed 404 page

mod auth;
mod follow;
mod group;
mod home;
mod post;
mod profile;

#[cfg(test)]
mod tests;

use axum::Router;
use axum::routing::{get, post as post_method};
use gazette_core::{PAGE_SIZE, Page, PostView, User, page};
use serde::Deserialize;
use tower_http::services::ServeDir;

use crate::error::WebError;
use crate::render::AuthorStats;
use crate::repo;
use crate::state::AppState;

/// Build the complete service router.
pub fn router(state: AppState) -> Router {
    let media = ServeDir::new(state.media.root().to_path_buf());

    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health_check))
        .route("/new", get(post::new_post_page).post(post::new_post_submit))
        .route("/follow", get(follow::follow_index))
        .route("/group/{slug}", get(group::group_posts))
        .route(
            "/auth/login",
            get(auth::login_page).post(auth::login_submit),
        )
        .route("/auth/logout", get(auth::logout))
        .route("/{username}", get(profile::profile))
        .route("/{username}/follow", get(follow::profile_follow))
        .route("/{username}/unfollow", get(follow::profile_unfollow))
        .route("/{username}/{post_id}", get(post::post_view))
        .route(
            "/{username}/{post_id}/edit",
            get(post::post_edit_page).post(post::post_edit_submit),
        )
        .route(
            "/{username}/{post_id}/comment",
            post_method(post::add_comment),
        )
        .nest_service("/media", media)
        .fallback(not_found)
        .with_state(state)
}

/// Fixed 404 page for unmatched paths.
async fn not_found() -> WebError {
    WebError::NotFound("no such page".to_string())
}

/// `page` query parameter.
///
/// Kept as a raw string so unparseable values clamp to page 1 instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    pub(crate) fn requested(&self) -> Option<i64> {
        self.page.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Resolve a username to its user row or 404.
pub(crate) async fn resolve_author(state: &AppState, username: &str) -> Result<User, WebError> {
    repo::users::fetch_by_username(&state.db, username)
        .await?
        .ok_or_else(|| WebError::NotFound(format!("user {username}")))
}

/// Resolve a `(username, post_id)` pair to the post's view row.
///
/// 404 when the id is not numeric, the post does not exist, or its author
/// does not match the username in the URL.
pub(crate) async fn resolve_post(
    state: &AppState,
    username: &str,
    post_id: &str,
) -> Result<PostView, WebError> {
    let id: i64 = post_id
        .parse()
        .map_err(|_| WebError::NotFound(format!("post {post_id}")))?;

    let post = repo::posts::fetch_view(&state.db, id)
        .await?
        .ok_or_else(|| WebError::NotFound(format!("post {id}")))?;

    if post.author_username != username {
        return Err(WebError::NotFound(format!("post {id} by {username}")));
    }
    Ok(post)
}

/// Counters for an author's profile header.
pub(crate) async fn author_stats(state: &AppState, author_id: i64) -> Result<AuthorStats, WebError> {
    Ok(AuthorStats {
        posts: repo::posts::count_by_author(&state.db, author_id).await?,
        followers: repo::follows::follower_count(&state.db, author_id).await?,
        following: repo::follows::following_count(&state.db, author_id).await?,
    })
}

/// Clamp a requested page against a total and assemble a [`Page`] from the
/// fetch the closure performs with the computed limit/offset.
pub(crate) async fn paged<F, Fut>(
    total: i64,
    requested: Option<i64>,
    fetch: F,
) -> Result<Page<PostView>, WebError>
where
    F: FnOnce(i64, i64) -> Fut,
    Fut: std::future::Future<Output = sqlx::Result<Vec<PostView>>>,
{
    let (number, offset) = page::clamp(requested, total, PAGE_SIZE);
    let items = fetch(PAGE_SIZE, offset).await?;
    Ok(page::paginate(items, number, total, PAGE_SIZE))
}
