//! Home feed (cached) and health check.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use gazette_core::{PAGE_SIZE, page};
use maud::PreEscaped;
use serde_json::json;

use super::{PageQuery, paged};
use crate::auth::Viewer;
use crate::cache;
use crate::error::WebError;
use crate::render::feed;
use crate::repo;
use crate::state::AppState;

/// `GET /` — all posts, newest first, page size 10.
///
/// The post list is served from the moka cache under a key per clamped page
/// number and expires on the configured TTL (20 s by default). Publishing
/// does not invalidate, so a fresh post may stay invisible here for up to
/// one TTL. The page shell around the list carries the viewer's nav and is
/// composed per request; only the viewer-independent fragment is shared.
pub async fn index(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Query(query): Query<PageQuery>,
) -> Result<Response, WebError> {
    let total = repo::posts::count_all(&state.db).await?;
    let (number, _) = page::clamp(query.requested(), total, PAGE_SIZE);
    let key = format!("index:page={number}");

    let body = cache::get_or_render(&state.cache, &key, || async {
        let page = paged(total, Some(number), |limit, offset| {
            repo::posts::list_all(&state.db, limit, offset)
        })
        .await?;
        Ok(feed::index_body(&page).into_string())
    })
    .await?;

    let markup = feed::index(&state.config.site_name, viewer.as_ref(), PreEscaped(body));
    Ok(Html(markup.into_string()).into_response())
}

/// `GET /health` — liveness probe.
pub async fn health_check(State(state): State<AppState>) -> Result<Response, WebError> {
    // One trivial query proves the pool is usable.
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.db)
        .await?;

    Ok(Json(json!({ "status": "ok" })).into_response())
}
