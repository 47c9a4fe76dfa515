//! Follow feed and follow/unfollow actions.

use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use maud::Markup;

use super::{PageQuery, paged, resolve_author};
use crate::auth::RequireUser;
use crate::error::WebError;
use crate::render;
use crate::repo;
use crate::state::AppState;

/// `GET /follow` — posts only from authors the current user follows.
pub async fn follow_index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<PageQuery>,
) -> Result<Markup, WebError> {
    let total = repo::posts::count_followed(&state.db, user.id).await?;
    let page = paged(total, query.requested(), |limit, offset| {
        repo::posts::list_followed(&state.db, user.id, limit, offset)
    })
    .await?;

    Ok(render::feed::follow_index(
        &state.config.site_name,
        &user,
        &page,
    ))
}

/// `GET /{username}/follow` — idempotently create the follow edge, then
/// redirect to the profile. Following yourself is a silent no-op.
pub async fn profile_follow(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(username): Path<String>,
) -> Result<Redirect, WebError> {
    let author = resolve_author(&state, &username).await?;

    if author.id != user.id {
        let inserted = repo::follows::follow(&state.db, user.id, author.id).await?;
        if inserted {
            tracing::info!(follower = %user.username, author = %author.username, "followed");
        }
    }

    Ok(Redirect::to(&format!("/{username}")))
}

/// `GET /{username}/unfollow` — idempotently remove the follow edge, then
/// redirect to the profile. A missing edge is not an error.
pub async fn profile_unfollow(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(username): Path<String>,
) -> Result<Redirect, WebError> {
    let author = resolve_author(&state, &username).await?;

    let removed = repo::follows::unfollow(&state.db, user.id, author.id).await?;
    if removed {
        tracing::info!(follower = %user.username, author = %author.username, "unfollowed");
    }

    Ok(Redirect::to(&format!("/{username}")))
}
