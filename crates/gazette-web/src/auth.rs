//! Session-cookie authentication.
//!
//! The "current user" is never ambient: handlers receive it explicitly
//! through one of two extractors. [`Viewer`] yields `Option<User>` for
//! public pages that adapt to login state; [`RequireUser`] yields `User`
//! and rejects unauthenticated requests with a redirect to
//! `/auth/login?next={original path}`, performing no writes.
//!
//! A session is a UUID token in the `gazette_session` cookie mapped to a
//! user through the `sessions` table.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use gazette_core::User;

use crate::error::WebError;
use crate::repo;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "gazette_session";

/// The requesting user, if any. Never rejects on missing auth.
pub struct Viewer(pub Option<User>);

/// The requesting user; rejects with a login redirect when absent.
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for Viewer {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(parts) else {
            return Ok(Viewer(None));
        };

        let user = repo::sessions::fetch_user(&state.db, &token).await?;
        if user.is_none() {
            tracing::debug!("stale session cookie");
        }
        Ok(Viewer(user))
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Viewer(user) = Viewer::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match user {
            Some(user) => Ok(RequireUser(user)),
            None => Err(login_redirect(parts.uri.path()).into_response()),
        }
    }
}

/// Redirect an unauthenticated request to the login page, preserving the
/// original target in `next`.
pub fn login_redirect(next: &str) -> Redirect {
    Redirect::to(&format!("/auth/login?next={next}"))
}

/// Extract the session token from the Cookie header, if present.
fn session_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Hash a password with argon2id for storage.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        tracing::warn!("malformed password hash in users table");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
