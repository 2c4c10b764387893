//! Disk-backed image store.
//!
//! Files land at `{dir}/{YYYYMMDDHHMMSS}_{user_id}.jpg`. There is no
//! uniqueness guard: a second image from the same user within the same
//! second overwrites the first.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use linedrop_core::{ImageStore, LinedropError};
use tokio::fs;
use tracing::{debug, info};

/// Local-clock, second-resolution timestamp used as the filename prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const IMAGE_EXTENSION: &str = "jpg";

/// Build the file name for an image received from `user_id` at `at`.
///
/// Characters outside `[A-Za-z0-9_-]` are replaced with `_` so an id can
/// never escape the save directory.
pub fn image_file_name(at: DateTime<Local>, user_id: &str) -> String {
    let safe_user: String = user_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}_{}.{}", at.format(TIMESTAMP_FORMAT), safe_user, IMAGE_EXTENSION)
}

/// Writes images into a single flat directory.
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    dir: PathBuf,
}

impl DiskImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the save directory if it does not exist. Idempotent.
    pub async fn ensure_dir(&self) -> Result<(), LinedropError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| LinedropError::Persist {
                path: self.dir.clone(),
                source,
            })
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn save(
        &self,
        user_id: &str,
        at: DateTime<Local>,
        data: &[u8],
    ) -> Result<PathBuf, LinedropError> {
        self.ensure_dir().await?;

        let path = self.dir.join(image_file_name(at, user_id));
        if fs::try_exists(&path).await.unwrap_or(false) {
            debug!(path = %path.display(), "Overwriting image with the same timestamp and user");
        }

        fs::write(&path, data)
            .await
            .map_err(|source| LinedropError::Persist {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), bytes = data.len(), "Image saved");
        Ok(path)
    }
}
