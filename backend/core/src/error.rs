use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the linedrop webhook pipeline.
#[derive(Debug, Error)]
pub enum LinedropError {
    /// `X-Line-Signature` was missing, malformed, or did not match the body.
    #[error("invalid signature")]
    InvalidSignature,

    #[error("failed to parse webhook payload: {0}")]
    PayloadParse(#[from] serde_json::Error),

    #[error("failed to fetch content for message {message_id}: {reason}")]
    MediaFetch { message_id: String, reason: String },

    #[error("failed to write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("credential {name} unavailable: {reason}")]
    StartupCredential { name: String, reason: String },
}
