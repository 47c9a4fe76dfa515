//! In-memory page caching with moka.
//!
//! The home feed is the one expensive, high-traffic page; its rendered post
//! list is cached under a key per page number and expires on a fixed
//! wall-clock TTL (20 seconds by default, `GAZETTE_CACHE_TTL_SECS`). Cached
//! fragments are shared across visitors, so they must never contain
//! anything viewer-dependent; the page shell is composed per request.
//!
//! Writes do not invalidate: a freshly published post can stay invisible on
//! the home feed for up to one TTL. That staleness window is the accepted
//! trade-off for never recomputing the page more than once per interval.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;

use crate::error::WebError;

/// Cache capacity (number of rendered pages).
pub const CACHE_CAPACITY: u64 = 1000;

/// Cached rendered page with metadata.
#[derive(Clone, Debug)]
pub struct CachedPage {
    /// Rendered HTML string.
    pub html: String,
    /// When this entry was cached.
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

/// Type alias for the rendered-page cache.
pub type PageCache = Cache<String, CachedPage>;

/// Create a new page cache with the given TTL.
pub fn new_cache(ttl: Duration) -> PageCache {
    Cache::builder()
        .max_capacity(CACHE_CAPACITY)
        .time_to_live(ttl)
        .build()
}

/// Get a cached page or render and cache it.
///
/// Checks the cache for `key`; on a miss, awaits `render`, stores the
/// resulting HTML, and returns it.
pub async fn get_or_render<F, Fut>(
    cache: &PageCache,
    key: &str,
    render: F,
) -> Result<String, WebError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, WebError>>,
{
    if let Some(entry) = cache.get(key).await {
        tracing::debug!(key = %key, cached_at = %entry.cached_at, "page cache hit");
        return Ok(entry.html);
    }

    tracing::debug!(key = %key, "page cache miss, rendering");
    let html = render().await?;

    let entry = CachedPage {
        html: html.clone(),
        cached_at: chrono::Utc::now(),
    };
    cache.insert(key.to_string(), entry).await;

    Ok(html)
}

/// Drop every cached page immediately.
///
/// The normal lifecycle is TTL expiry; this exists for tests and for
/// operational flushes.
pub async fn clear(cache: &PageCache) {
    cache.invalidate_all();
    // run_pending_tasks makes the invalidation visible to immediate readers
    cache.run_pending_tasks().await;
}
