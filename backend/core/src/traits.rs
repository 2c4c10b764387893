use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Local};

use crate::error::LinedropError;

/// Retrieves the binary content attached to a platform message.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Download the content for `message_id`. One attempt, no retry.
    async fn fetch(&self, message_id: &str) -> Result<Bytes, LinedropError>;
}

/// Persists downloaded images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `data` for `user_id`, stamped with `at`, returning the written path.
    ///
    /// Two calls with the same user and the same second target the same path;
    /// the later write wins.
    async fn save(
        &self,
        user_id: &str,
        at: DateTime<Local>,
        data: &[u8],
    ) -> Result<PathBuf, LinedropError>;
}
