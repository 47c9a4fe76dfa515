//! Login and logout.

use axum::Form;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use maud::Markup;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth;
use crate::error::WebError;
use crate::render;
use crate::repo;
use crate::state::AppState;

const LOGIN_ERROR: &str = "invalid username or password.";

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
    #[serde(default)]
    next: Option<String>,
}

/// `GET /auth/login` — login form; `next` is carried through for the
/// post-login redirect.
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
) -> Markup {
    render::login::login(&state.config.site_name, query.next.as_deref(), None)
}

/// `POST /auth/login` — verify credentials, open a session, redirect.
///
/// Failure re-renders the form with a fixed error line and HTTP 200; the
/// attempted password is never echoed back.
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let user = repo::users::fetch_by_username(&state.db, &form.username).await?;

    let Some(user) = user.filter(|u| auth::verify_password(&form.password, &u.password_hash))
    else {
        tracing::debug!(username = %form.username, "login rejected");
        let markup = render::login::login(
            &state.config.site_name,
            form.next.as_deref(),
            Some(LOGIN_ERROR),
        );
        return Ok(markup.into_response());
    };

    let token = Uuid::new_v4().to_string();
    repo::sessions::create(&state.db, &token, user.id).await?;
    tracing::info!(username = %user.username, "logged in");

    let target = sanitize_next(form.next.as_deref());
    Ok((
        AppendHeaders([(SET_COOKIE, auth::session_cookie(&token))]),
        Redirect::to(target),
    )
        .into_response())
}

/// `GET /auth/logout` — drop the session and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    if let Some(token) = cookie_token(&headers) {
        repo::sessions::delete(&state.db, &token).await?;
    }

    Ok((
        AppendHeaders([(SET_COOKIE, auth::clear_session_cookie())]),
        Redirect::to("/"),
    )
        .into_response())
}

/// Only site-local absolute paths are honored as redirect targets; anything
/// else (external URLs, scheme-relative tricks) falls back to the home feed.
fn sanitize_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == auth::SESSION_COOKIE).then(|| value.to_string())
    })
}
