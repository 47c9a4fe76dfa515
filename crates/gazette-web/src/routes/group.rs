//! Group feed.

use axum::extract::{Path, Query, State};
use maud::Markup;

use super::{PageQuery, paged};
use crate::auth::Viewer;
use crate::error::WebError;
use crate::render;
use crate::repo;
use crate::state::AppState;

/// `GET /group/{slug}` — one group's posts, newest first.
pub async fn group_posts(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Markup, WebError> {
    let group = repo::groups::fetch_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| WebError::NotFound(format!("group {slug}")))?;

    let total = repo::posts::count_by_group(&state.db, group.id).await?;
    let page = paged(total, query.requested(), |limit, offset| {
        repo::posts::list_by_group(&state.db, group.id, limit, offset)
    })
    .await?;

    Ok(render::group::group_posts(
        &state.config.site_name,
        viewer.as_ref(),
        &group,
        &page,
    ))
}
