//! Local media storage for validated image uploads.
//!
//! Files are written under the configured media directory as
//! `{uuid}.{ext}`, with the extension taken from the sniffed format rather
//! than the client-supplied filename. The stored relative path goes on the
//! post row and is served read-only under `/media`.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::forms::ValidImage;

/// Writes uploads into a directory and hands back their relative paths.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Directory uploads are written into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a validated image; returns the media-relative path.
    pub async fn save(&self, image: &ValidImage) -> anyhow::Result<String> {
        let name = format!("{}.{}", Uuid::new_v4(), image.extension());
        let path = self.root.join(&name);
        tokio::fs::write(&path, &image.bytes).await?;
        tracing::debug!(path = %path.display(), size = image.bytes.len(), "stored upload");
        Ok(name)
    }

    /// Remove a stored upload. A missing file is not an error.
    pub async fn remove(&self, name: &str) -> anyhow::Result<()> {
        let path = self.root.join(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed upload");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
