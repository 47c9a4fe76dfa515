//! Application state shared across all request handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::cache::{self, PageCache};
use crate::config::Config;
use crate::media::MediaStore;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// SQLite pool for all persistence.
    pub db: SqlitePool,

    /// Application configuration.
    pub config: Arc<Config>,

    /// In-memory rendered-page cache for the home feed.
    pub cache: PageCache,

    /// Upload storage, served under `/media`.
    pub media: MediaStore,
}

impl AppState {
    /// Create a new application state from configuration, a connected pool,
    /// and an initialized media store. Migrations are expected to have run
    /// already.
    pub fn new(config: Config, db: SqlitePool, media: MediaStore) -> Self {
        let cache = cache::new_cache(config.cache_ttl);

        tracing::info!(
            cache_ttl_secs = config.cache_ttl.as_secs(),
            media_dir = %media.root().display(),
            "application state initialized"
        );

        Self {
            db,
            config: Arc::new(config),
            cache,
            media,
        }
    }
}
