//! Author profile page.

use axum::extract::{Path, Query, State};
use maud::Markup;

use super::{PageQuery, author_stats, paged, resolve_author};
use crate::auth::Viewer;
use crate::error::WebError;
use crate::render;
use crate::repo;
use crate::state::AppState;

/// `GET /{username}` — an author's posts plus follower/following counters.
///
/// When the viewer is logged in the page also reports whether they currently
/// follow this author (that drives the follow/unfollow button).
pub async fn profile(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Markup, WebError> {
    let author = resolve_author(&state, &username).await?;
    let stats = author_stats(&state, author.id).await?;

    let following = match &viewer {
        Some(user) => Some(repo::follows::is_following(&state.db, user.id, author.id).await?),
        None => None,
    };

    let total = repo::posts::count_by_author(&state.db, author.id).await?;
    let page = paged(total, query.requested(), |limit, offset| {
        repo::posts::list_by_author(&state.db, author.id, limit, offset)
    })
    .await?;

    Ok(render::profile::profile(
        &state.config.site_name,
        viewer.as_ref(),
        &author,
        stats,
        following,
        &page,
    ))
}
