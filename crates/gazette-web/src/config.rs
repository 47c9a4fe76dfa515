//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// SQLite connection URL.
    pub database_url: String,

    /// Directory uploaded images are written to (served under `/media`).
    pub media_dir: PathBuf,

    /// Site name shown in page titles and the nav bar.
    pub site_name: String,

    /// Time-to-live of the rendered home-feed cache.
    pub cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables have defaults for local development:
    /// - `GAZETTE_BIND_ADDR`: bind address (default: "0.0.0.0:8080")
    /// - `DATABASE_URL`: SQLite URL (default: "sqlite://gazette.db?mode=rwc")
    /// - `GAZETTE_MEDIA_DIR`: upload directory (default: "./media")
    /// - `GAZETTE_SITE_NAME`: site name (default: "Gazette")
    /// - `GAZETTE_CACHE_TTL_SECS`: home-feed cache TTL (default: 20)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("GAZETTE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://gazette.db?mode=rwc".to_string());

        let media_dir = std::env::var("GAZETTE_MEDIA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./media"));

        let site_name =
            std::env::var("GAZETTE_SITE_NAME").unwrap_or_else(|_| "Gazette".to_string());

        let cache_ttl_secs = match std::env::var("GAZETTE_CACHE_TTL_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("GAZETTE_CACHE_TTL_SECS must be an integer: {raw}"))?,
            Err(_) => 20,
        };

        tracing::info!(
            bind_addr = %bind_addr,
            database_url = %database_url,
            media_dir = %media_dir.display(),
            site_name = %site_name,
            cache_ttl_secs,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            database_url,
            media_dir,
            site_name,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }
}
