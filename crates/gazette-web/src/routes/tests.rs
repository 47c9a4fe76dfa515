//! Route-level tests against the full router over an in-memory database.

use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use gazette_core::User;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::util::ServiceExt;

use crate::auth;
use crate::cache;
use crate::config::Config;
use crate::media::MediaStore;
use crate::repo;
use crate::state::AppState;

/// 1x1 transparent GIF, a complete well-formed file.
const TINY_GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x0a, 0x00, 0x01, 0x00, 0x2c, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x4c, 0x01, 0x00, 0x3b,
];

const BOUNDARY: &str = "gazette-test-boundary";

struct Harness {
    app: Router,
    state: AppState,
    // Keeps the media directory alive for the test's duration.
    _media_dir: tempfile::TempDir,
}

async fn harness() -> Harness {
    harness_with_ttl(Duration::from_secs(60)).await
}

async fn harness_with_ttl(cache_ttl: Duration) -> Harness {
    let pool: SqlitePool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    crate::MIGRATOR.run(&pool).await.unwrap();

    let media_dir = tempfile::tempdir().unwrap();
    let media = MediaStore::new(media_dir.path()).await.unwrap();

    let config = Config {
        bind_addr: "127.0.0.1:0".to_string(),
        database_url: ":memory:".to_string(),
        media_dir: PathBuf::from(media_dir.path()),
        site_name: "Gazette".to_string(),
        cache_ttl,
    };

    let state = AppState::new(config, pool, media);
    let app = super::router(state.clone());

    Harness {
        app,
        state,
        _media_dir: media_dir,
    }
}

async fn create_user(state: &AppState, username: &str) -> User {
    let hash = auth::hash_password("123456").unwrap();
    repo::users::create(&state.db, username, &format!("{username}@test.ru"), &hash)
        .await
        .unwrap()
}

/// Open a session for a user; returns the Cookie header value.
async fn login(state: &AppState, user: &User) -> String {
    let token = uuid::Uuid::new_v4().to_string();
    repo::sessions::create(&state.db, &token, user.id)
        .await
        .unwrap();
    format!("{}={token}", auth::SESSION_COOKIE)
}

async fn get(app: &Router, path: &str, cookie: Option<&str>) -> (StatusCode, String) {
    let mut request = Request::builder().uri(path).method("GET");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    send(app, request.body(Body::empty()).unwrap()).await
}

async fn post_urlencoded(
    app: &Router,
    path: &str,
    body: &str,
    cookie: Option<&str>,
) -> (StatusCode, String) {
    let mut request = Request::builder()
        .uri(path)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    send(app, request.body(Body::from(body.to_string())).unwrap()).await
}

async fn post_multipart(
    app: &Router,
    path: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
    cookie: Option<&str>,
) -> (StatusCode, String) {
    let body = multipart_body(fields, file);
    let mut request = Request::builder().uri(path).method("POST").header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    send(app, request.body(Body::from(body)).unwrap()).await
}

fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

/// Like [`get`], but returns the Location header of a redirect.
async fn get_redirect_target(app: &Router, path: &str, cookie: Option<&str>) -> (StatusCode, String) {
    let mut request = Request::builder().uri(path).method("GET");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    let response = app
        .clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    (response.status(), location)
}

async fn post_count(state: &AppState) -> i64 {
    repo::posts::count_all(&state.db).await.unwrap()
}

async fn follow_edge_count(state: &AppState) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM follows")
        .fetch_one(&state.db)
        .await
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// Publishing
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn new_post_displays_on_all_pages() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let cookie = login(&h.state, &user).await;
    let group = repo::groups::create(&h.state.db, "title", "slug", "description")
        .await
        .unwrap();

    let (status, _) = post_multipart(
        &h.app,
        "/new",
        &[("text", "some text..."), ("group", &group.id.to_string())],
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(post_count(&h.state).await, 1);

    let post = repo::posts::fetch(&h.state.db, 1).await.unwrap().unwrap();
    assert_eq!(post.author_id, user.id);

    cache::clear(&h.state.cache).await;

    for url in ["/", "/test", "/test/1", "/group/slug"] {
        let (status, body) = get(&h.app, url, Some(&cookie)).await;
        assert_eq!(status, StatusCode::OK, "{url}");
        assert!(body.contains("some text..."), "{url}");
    }
}

#[tokio::test]
async fn new_post_without_auth_redirects_to_login() {
    let h = harness().await;

    let (status, body) = post_multipart(&h.app, "/new", &[("text", "text")], None, None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(body.is_empty());
    assert_eq!(post_count(&h.state).await, 0);

    let (_, location) = get_redirect_target(&h.app, "/new", None).await;
    assert_eq!(location, "/auth/login?next=/new");
}

#[tokio::test]
async fn post_with_image_renders_img_tag_on_all_pages() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let cookie = login(&h.state, &user).await;
    repo::groups::create(&h.state.db, "title", "slug", "description")
        .await
        .unwrap();

    let (status, _) = post_multipart(
        &h.app,
        "/new",
        &[("text", "look"), ("group", "1")],
        Some(("small.gif", TINY_GIF)),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let post = repo::posts::fetch(&h.state.db, 1).await.unwrap().unwrap();
    let image = post.image.expect("image stored");
    assert!(image.ends_with(".gif"));

    cache::clear(&h.state.cache).await;

    for url in ["/", "/test", "/test/1", "/group/slug"] {
        let (_, body) = get(&h.app, url, Some(&cookie)).await;
        assert!(body.contains("<img "), "{url}");
    }
}

#[tokio::test]
async fn non_image_upload_is_rejected_and_persists_nothing() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let cookie = login(&h.state, &user).await;

    let (status, body) = post_multipart(
        &h.app,
        "/new",
        &[("text", "some text...")],
        Some(("small.txt", b"test")),
        Some(&cookie),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(crate::forms::IMAGE_ERROR));
    assert_eq!(post_count(&h.state).await, 0);
}

#[tokio::test]
async fn empty_text_is_rejected_with_field_error() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let cookie = login(&h.state, &user).await;

    let (status, body) =
        post_multipart(&h.app, "/new", &[("text", "  ")], None, Some(&cookie)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(crate::forms::REQUIRED_ERROR));
    assert_eq!(post_count(&h.state).await, 0);
}

#[tokio::test]
async fn unknown_group_selection_is_rejected() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let cookie = login(&h.state, &user).await;

    let (status, body) = post_multipart(
        &h.app,
        "/new",
        &[("text", "text"), ("group", "42")],
        None,
        Some(&cookie),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(crate::forms::GROUP_ERROR));
    assert_eq!(post_count(&h.state).await, 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Editing
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn author_edit_updates_all_pages() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let cookie = login(&h.state, &user).await;
    let group = repo::groups::create(&h.state.db, "title", "slug", "description")
        .await
        .unwrap();
    repo::posts::create(&h.state.db, "some text...", None, user.id, Some(group.id))
        .await
        .unwrap();

    let (status, _) = post_multipart(
        &h.app,
        "/test/1/edit",
        &[
            ("text", "yet another text..."),
            ("group", &group.id.to_string()),
        ],
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    cache::clear(&h.state.cache).await;

    for url in ["/", "/test", "/test/1", "/group/slug"] {
        let (_, body) = get(&h.app, url, Some(&cookie)).await;
        assert!(body.contains("yet another text..."), "{url}");
        assert!(!body.contains("some text..."), "{url}");
    }
}

#[tokio::test]
async fn non_author_edit_is_a_silent_redirect() {
    let h = harness().await;
    let author = create_user(&h.state, "author_1").await;
    let intruder = create_user(&h.state, "intruder").await;
    let cookie = login(&h.state, &intruder).await;
    repo::posts::create(&h.state.db, "some text...", None, author.id, None)
        .await
        .unwrap();

    let (status, location) = get_redirect_target(&h.app, "/author_1/1/edit", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/author_1/1");

    let (status, _) = post_multipart(
        &h.app,
        "/author_1/1/edit",
        &[("text", "hijacked")],
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let post = repo::posts::fetch(&h.state.db, 1).await.unwrap().unwrap();
    assert_eq!(post.text, "some text...");
}

#[tokio::test]
async fn replacing_an_upload_removes_the_old_file() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let cookie = login(&h.state, &user).await;

    post_multipart(
        &h.app,
        "/new",
        &[("text", "first")],
        Some(("first.gif", TINY_GIF)),
        Some(&cookie),
    )
    .await;
    let old = repo::posts::fetch(&h.state.db, 1)
        .await
        .unwrap()
        .unwrap()
        .image
        .expect("image stored");
    assert!(h.state.media.root().join(&old).exists());

    let (status, _) = post_multipart(
        &h.app,
        "/test/1/edit",
        &[("text", "second")],
        Some(("second.gif", TINY_GIF)),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let replacement = repo::posts::fetch(&h.state.db, 1)
        .await
        .unwrap()
        .unwrap()
        .image
        .expect("image kept");
    assert_ne!(replacement, old);
    assert!(h.state.media.root().join(&replacement).exists());
    assert!(!h.state.media.root().join(&old).exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// Follows
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn follow_is_idempotent() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let author = create_user(&h.state, "author_1").await;
    let cookie = login(&h.state, &user).await;
    let _ = author;

    for _ in 0..2 {
        let (status, location) =
            get_redirect_target(&h.app, "/author_1/follow", Some(&cookie)).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/author_1");
    }
    assert_eq!(follow_edge_count(&h.state).await, 1);
}

#[tokio::test]
async fn self_follow_creates_nothing() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let cookie = login(&h.state, &user).await;

    let (status, location) = get_redirect_target(&h.app, "/test/follow", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/test");
    assert_eq!(follow_edge_count(&h.state).await, 0);
}

#[tokio::test]
async fn unfollow_without_edge_is_a_no_op() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    create_user(&h.state, "author_1").await;
    let cookie = login(&h.state, &user).await;

    let (status, location) = get_redirect_target(&h.app, "/author_1/unfollow", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/author_1");
    assert_eq!(follow_edge_count(&h.state).await, 0);
}

#[tokio::test]
async fn follower_count_tracks_follow_and_unfollow() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    create_user(&h.state, "author_1").await;
    let cookie = login(&h.state, &user).await;

    let (_, body) = get(&h.app, "/author_1", Some(&cookie)).await;
    assert!(body.contains("Followers: 0"));

    get_redirect_target(&h.app, "/author_1/follow", Some(&cookie)).await;
    let (_, body) = get(&h.app, "/author_1", Some(&cookie)).await;
    assert!(body.contains("Followers: 1"));

    get_redirect_target(&h.app, "/author_1/unfollow", Some(&cookie)).await;
    let (_, body) = get(&h.app, "/author_1", Some(&cookie)).await;
    assert!(body.contains("Followers: 0"));
}

#[tokio::test]
async fn follow_index_shows_only_followed_authors() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let author = create_user(&h.state, "author_1").await;
    let cookie = login(&h.state, &user).await;
    repo::posts::create(&h.state.db, "some text...", None, author.id, None)
        .await
        .unwrap();

    let (_, body) = get(&h.app, "/follow", Some(&cookie)).await;
    assert!(!body.contains("some text..."));

    get_redirect_target(&h.app, "/author_1/follow", Some(&cookie)).await;

    let (_, body) = get(&h.app, "/follow", Some(&cookie)).await;
    assert!(body.contains("some text..."));
}

// ═══════════════════════════════════════════════════════════════════════════
// Comments
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn only_authenticated_users_can_comment() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let cookie = login(&h.state, &user).await;
    repo::posts::create(&h.state.db, "some text...", None, user.id, None)
        .await
        .unwrap();

    let (status, _) = post_urlencoded(
        &h.app,
        "/test/1/comment",
        "text=some+comments...",
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, body) = get(&h.app, "/test/1", Some(&cookie)).await;
    assert!(body.contains("some comments..."));

    // Unauthenticated: redirected to login, nothing stored.
    let (status, _) =
        post_urlencoded(&h.app, "/test/1/comment", "text=anonymous+comment", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, body) = get(&h.app, "/test/1", None).await;
    assert!(!body.contains("anonymous comment"));
    assert_eq!(
        repo::comments::count_for_post(&h.state.db, 1).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn empty_comment_is_rejected_in_place() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let cookie = login(&h.state, &user).await;
    repo::posts::create(&h.state.db, "some text...", None, user.id, None)
        .await
        .unwrap();

    let (status, body) = post_urlencoded(&h.app, "/test/1/comment", "text=", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(crate::forms::REQUIRED_ERROR));
    assert_eq!(
        repo::comments::count_for_post(&h.state.db, 1).await.unwrap(),
        0
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Home feed cache
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn home_feed_is_stale_within_ttl() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    repo::posts::create(&h.state.db, "cached", None, user.id, None)
        .await
        .unwrap();

    let (_, body) = get(&h.app, "/", None).await;
    assert!(body.contains("cached"));

    repo::posts::create(&h.state.db, "not_cached", None, user.id, None)
        .await
        .unwrap();

    let (_, body) = get(&h.app, "/", None).await;
    assert!(!body.contains("not_cached"));
}

#[tokio::test]
async fn home_feed_refreshes_after_ttl_expiry() {
    let h = harness_with_ttl(Duration::from_millis(50)).await;
    let user = create_user(&h.state, "test").await;
    repo::posts::create(&h.state.db, "cached", None, user.id, None)
        .await
        .unwrap();

    let (_, body) = get(&h.app, "/", None).await;
    assert!(body.contains("cached"));

    repo::posts::create(&h.state.db, "not_cached", None, user.id, None)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(80)).await;

    let (_, body) = get(&h.app, "/", None).await;
    assert!(body.contains("not_cached"));
}

#[tokio::test]
async fn cached_home_page_keeps_per_visitor_nav() {
    let h = harness().await;
    let author = create_user(&h.state, "author_1").await;
    let lurker = create_user(&h.state, "lurker").await;
    let cookie = login(&h.state, &lurker).await;
    repo::posts::create(&h.state.db, "some text...", None, author.id, None)
        .await
        .unwrap();

    // A logged-in visitor primes the cache.
    let (_, body) = get(&h.app, "/", Some(&cookie)).await;
    assert!(body.contains("lurker"));
    assert!(body.contains("Log out"));

    // Within the TTL an anonymous visitor shares the post list but not the
    // first visitor's nav.
    let (_, body) = get(&h.app, "/", None).await;
    assert!(body.contains("some text..."));
    assert!(!body.contains("lurker"));
    assert!(!body.contains("Log out"));
    assert!(body.contains("Log in"));

    // And logged-in chrome survives an anonymous request in between.
    let (_, body) = get(&h.app, "/", Some(&cookie)).await;
    assert!(body.contains("Log out"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Pagination
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn home_feed_paginates_at_ten_and_clamps() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    for i in 0..15 {
        repo::posts::create(&h.state.db, &format!("post number {i}"), None, user.id, None)
            .await
            .unwrap();
    }

    let (_, body) = get(&h.app, "/", None).await;
    assert_eq!(body.matches("<article").count(), 10);
    assert!(body.contains("page 1 of 2"));

    let (_, body) = get(&h.app, "/?page=2", None).await;
    assert_eq!(body.matches("<article").count(), 5);
    assert!(body.contains("page 2 of 2"));

    // Out-of-range pages clamp to the nearest valid page.
    let (_, body) = get(&h.app, "/?page=99", None).await;
    assert!(body.contains("page 2 of 2"));
    let (_, body) = get(&h.app, "/?page=0", None).await;
    assert!(body.contains("page 1 of 2"));
}

#[tokio::test]
async fn out_of_range_pages_share_one_cache_entry() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    for i in 0..15 {
        repo::posts::create(&h.state.db, &format!("post number {i}"), None, user.id, None)
            .await
            .unwrap();
    }

    for path in ["/?page=2", "/?page=7", "/?page=99"] {
        let (_, body) = get(&h.app, path, None).await;
        assert!(body.contains("page 2 of 2"), "{path}");
    }

    h.state.cache.run_pending_tasks().await;
    assert!(h.state.cache.contains_key("index:page=2"));
    assert!(!h.state.cache.contains_key("index:page=7"));
    assert!(!h.state.cache.contains_key("index:page=99"));
    assert_eq!(h.state.cache.entry_count(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Not found / auth flow
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn unknown_resources_return_404() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let other = create_user(&h.state, "author_1").await;
    repo::posts::create(&h.state.db, "text", None, user.id, None)
        .await
        .unwrap();
    let _ = other;

    let (status, _) = get(&h.app, "/nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&h.app, "/group/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The post exists but belongs to "test", not "author_1".
    let (status, _) = get(&h.app, "/author_1/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&h.app, "/test/not-a-number", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&h.app, "/test/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_opens_a_session_and_honors_next() {
    let h = harness().await;
    create_user(&h.state, "test").await;

    let request = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=test&password=123456&next=/new"))
        .unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/new");
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("gazette_session="));
}

#[tokio::test]
async fn login_with_wrong_password_re_renders_the_form() {
    let h = harness().await;
    create_user(&h.state, "test").await;

    let (status, body) = post_urlencoded(
        &h.app,
        "/auth/login",
        "username=test&password=wrong",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("invalid username or password."));

    let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(&h.state.db)
        .await
        .unwrap();
    assert_eq!(sessions, 0);
}

#[tokio::test]
async fn logout_drops_the_session() {
    let h = harness().await;
    let user = create_user(&h.state, "test").await;
    let cookie = login(&h.state, &user).await;

    let (status, location) = get_redirect_target(&h.app, "/auth/logout", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/");

    // The old cookie no longer authenticates.
    let (_, location) = get_redirect_target(&h.app, "/new", Some(&cookie)).await;
    assert_eq!(location, "/auth/login?next=/new");
}

#[tokio::test]
async fn protected_routes_redirect_with_next() {
    let h = harness().await;
    create_user(&h.state, "author_1").await;

    for path in ["/new", "/follow", "/author_1/follow", "/author_1/unfollow"] {
        let (status, location) = get_redirect_target(&h.app, path, None).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location, format!("/auth/login?next={path}"), "{path}");
    }
}
