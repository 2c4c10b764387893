//! LINE Webhook Receiver
//!
//! Decodes a verified webhook body and routes each event. Image messages are
//! downloaded and persisted; everything else is acknowledged and dropped.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use linedrop_core::{ContentFetcher, ImageStore, LinedropError};
use tracing::{debug, error, info};

use crate::line_events::{CallbackRequest, Message, MessageEvent, WebhookEvent};

/// Stand-in sender id when the event source carries no `userId`.
pub const UNKNOWN_USER: &str = "unknown";

/// Outcome of handling one webhook body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub events: usize,
    pub saved: Vec<PathBuf>,
}

/// Routes webhook events into the download-then-persist pipeline.
#[derive(Clone)]
pub struct ImageIngest {
    fetcher: Arc<dyn ContentFetcher>,
    store: Arc<dyn ImageStore>,
}

impl ImageIngest {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, store: Arc<dyn ImageStore>) -> Self {
        Self { fetcher, store }
    }

    /// Parse `body` and handle its events in payload order.
    ///
    /// Fails only when the body does not match the webhook schema; per-event
    /// download and write failures are logged and skipped.
    pub async fn handle_body(&self, body: &[u8]) -> Result<IngestSummary, LinedropError> {
        let request: CallbackRequest = serde_json::from_slice(body)?;
        debug!(
            destination = request.destination.as_deref().unwrap_or("-"),
            events = request.events.len(),
            "Webhook payload decoded"
        );
        let mut summary = IngestSummary {
            events: request.events.len(),
            saved: Vec::new(),
        };

        for event in &request.events {
            if let Some(path) = self.handle_event(event).await {
                summary.saved.push(path);
            }
        }
        Ok(summary)
    }

    /// Handle a single event, returning the saved path for image messages.
    pub async fn handle_event(&self, event: &WebhookEvent) -> Option<PathBuf> {
        match event {
            WebhookEvent::Message(msg) => match &msg.message {
                Message::Image { id } => self.handle_image(msg, id).await,
                other => {
                    debug!(kind = other.kind(), "Ignoring non-image message");
                    None
                }
            },
            WebhookEvent::Follow
            | WebhookEvent::Unfollow
            | WebhookEvent::Join
            | WebhookEvent::Leave
            | WebhookEvent::Postback
            | WebhookEvent::Other => {
                debug!(kind = event.kind(), "Ignoring event");
                None
            }
        }
    }

    async fn handle_image(&self, event: &MessageEvent, message_id: &str) -> Option<PathBuf> {
        let user_id = event.user_id().unwrap_or(UNKNOWN_USER);
        info!(
            user_id = %user_id,
            message_id = %message_id,
            webhook_event_id = event.webhook_event_id.as_deref().unwrap_or("-"),
            "Received image"
        );

        let content = match self.fetcher.fetch(message_id).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(user_id = %user_id, message_id = %message_id, error = %e, "Error getting image content");
                return None;
            }
        };

        match self.store.save(user_id, Local::now(), &content).await {
            Ok(path) => Some(path),
            Err(e) => {
                error!(user_id = %user_id, message_id = %message_id, error = %e, "Error saving image");
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use chrono::DateTime;
    use linedrop_media::DiskImageStore;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Serves canned content and records which ids were requested.
    #[derive(Default)]
    pub(crate) struct FakeFetcher {
        pub content: Option<Bytes>,
        pub requested: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        pub(crate) fn serving(content: &'static [u8]) -> Self {
            Self {
                content: Some(Bytes::from_static(content)),
                ..Self::default()
            }
        }

        pub(crate) fn failing() -> Self {
            Self::default()
        }

        pub(crate) fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentFetcher for FakeFetcher {
        async fn fetch(&self, message_id: &str) -> Result<Bytes, LinedropError> {
            self.requested.lock().unwrap().push(message_id.to_string());
            self.content.clone().ok_or_else(|| LinedropError::MediaFetch {
                message_id: message_id.to_string(),
                reason: "connection refused".into(),
            })
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl ImageStore for BrokenStore {
        async fn save(&self, _: &str, _: DateTime<Local>, _: &[u8]) -> Result<PathBuf, LinedropError> {
            Err(LinedropError::Persist {
                path: PathBuf::from("Save_Path/x.jpg"),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    pub(crate) fn image_payload(user_id: &str, message_id: &str) -> String {
        serde_json::json!({
            "destination": "Ubot",
            "events": [{
                "type": "message",
                "replyToken": "token",
                "source": { "type": "user", "userId": user_id },
                "message": { "type": "image", "id": message_id, "contentProvider": { "type": "line" } }
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn image_event_is_downloaded_and_saved() {
        let dir = tempdir().unwrap();
        let fetcher = Arc::new(FakeFetcher::serving(b"jpeg-bytes"));
        let ingest = ImageIngest::new(fetcher.clone(), Arc::new(DiskImageStore::new(dir.path())));

        let summary = ingest
            .handle_body(image_payload("U1", "100").as_bytes())
            .await
            .unwrap();

        assert_eq!(summary.events, 1);
        assert_eq!(summary.saved.len(), 1);
        assert_eq!(fetcher.requested(), ["100"]);
        let name = summary.saved[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("_U1.jpg"), "unexpected name {name}");
        assert_eq!(std::fs::read(&summary.saved[0]).unwrap(), b"jpeg-bytes");
    }

    #[tokio::test]
    async fn text_and_other_events_are_ignored() {
        let dir = tempdir().unwrap();
        let fetcher = Arc::new(FakeFetcher::serving(b"unused"));
        let ingest = ImageIngest::new(fetcher.clone(), Arc::new(DiskImageStore::new(dir.path())));
        let body = serde_json::json!({
            "events": [
                { "type": "message", "source": { "type": "user", "userId": "U1" },
                  "message": { "type": "text", "id": "1", "text": "hi" } },
                { "type": "message", "source": { "type": "user", "userId": "U1" },
                  "message": { "type": "sticker", "id": "2", "packageId": "446", "stickerId": "1988" } },
                { "type": "unfollow", "source": { "type": "user", "userId": "U1" } },
                { "type": "beacon", "beacon": { "hwid": "d41d8cd98f" } }
            ]
        });

        let summary = ingest.handle_body(body.to_string().as_bytes()).await.unwrap();
        assert_eq!(summary.events, 4);
        assert!(summary.saved.is_empty());
        assert!(fetcher.requested().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn fetch_failure_skips_only_that_image() {
        let dir = tempdir().unwrap();
        let fetcher = Arc::new(FakeFetcher::failing());
        let ingest = ImageIngest::new(fetcher.clone(), Arc::new(DiskImageStore::new(dir.path())));

        let summary = ingest
            .handle_body(image_payload("U1", "100").as_bytes())
            .await
            .unwrap();
        assert!(summary.saved.is_empty());
        assert_eq!(fetcher.requested(), ["100"]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn persist_failure_is_absorbed() {
        let ingest = ImageIngest::new(
            Arc::new(FakeFetcher::serving(b"jpeg")),
            Arc::new(BrokenStore),
        );
        let summary = ingest
            .handle_body(image_payload("U1", "100").as_bytes())
            .await
            .unwrap();
        assert_eq!(summary.events, 1);
        assert!(summary.saved.is_empty());
    }

    #[tokio::test]
    async fn events_are_processed_in_payload_order() {
        let dir = tempdir().unwrap();
        let fetcher = Arc::new(FakeFetcher::serving(b"jpeg"));
        let ingest = ImageIngest::new(fetcher.clone(), Arc::new(DiskImageStore::new(dir.path())));
        let body = serde_json::json!({
            "events": [
                { "type": "message", "source": { "type": "user", "userId": "U1" },
                  "message": { "type": "image", "id": "first" } },
                { "type": "message", "source": { "type": "user", "userId": "U2" },
                  "message": { "type": "image", "id": "second" } }
            ]
        });

        let summary = ingest.handle_body(body.to_string().as_bytes()).await.unwrap();
        assert_eq!(fetcher.requested(), ["first", "second"]);
        assert_eq!(summary.saved.len(), 2);
    }

    #[tokio::test]
    async fn sparse_text_event_does_not_drop_images_in_the_same_batch() {
        let dir = tempdir().unwrap();
        let fetcher = Arc::new(FakeFetcher::serving(b"jpeg"));
        let ingest = ImageIngest::new(fetcher.clone(), Arc::new(DiskImageStore::new(dir.path())));
        let body = serde_json::json!({
            "events": [
                { "type": "message", "source": { "type": "user", "userId": "U1" },
                  "message": { "type": "text", "id": "1" } },
                { "type": "message", "source": { "type": "user", "userId": "U1" },
                  "message": { "type": "sticker", "id": "2" } },
                { "type": "message", "source": { "type": "user", "userId": "U1" },
                  "message": { "type": "image", "id": "3" } }
            ]
        });

        let summary = ingest.handle_body(body.to_string().as_bytes()).await.unwrap();
        assert_eq!(summary.events, 3);
        assert_eq!(fetcher.requested(), ["3"]);
        assert_eq!(summary.saved.len(), 1);
    }

    #[tokio::test]
    async fn missing_user_id_falls_back_to_unknown() {
        let dir = tempdir().unwrap();
        let ingest = ImageIngest::new(
            Arc::new(FakeFetcher::serving(b"jpeg")),
            Arc::new(DiskImageStore::new(dir.path())),
        );
        let body = serde_json::json!({
            "events": [{ "type": "message", "source": { "type": "group", "groupId": "C1" },
                         "message": { "type": "image", "id": "7" } }]
        });

        let summary = ingest.handle_body(body.to_string().as_bytes()).await.unwrap();
        let name = summary.saved[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("_unknown.jpg"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let ingest = ImageIngest::new(
            Arc::new(FakeFetcher::serving(b"jpeg")),
            Arc::new(BrokenStore),
        );
        let err = ingest.handle_body(br#"{"events": "nope"}"#).await.unwrap_err();
        assert!(matches!(err, LinedropError::PayloadParse(_)));
    }
}
