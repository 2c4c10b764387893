//! LINE message content client.
//!
//! Downloads the binary payload of image, video, audio, and file messages from
//! `GET {base}/v2/bot/message/{messageId}/content`.

use async_trait::async_trait;
use bytes::Bytes;
use linedrop_core::{ContentFetcher, LinedropError};
use reqwest::Client;
use tracing::{debug, error};

pub struct LineContentClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl LineContentClient {
    /// `base_url` is normally `https://api-data.line.me`; tests point it at wiremock.
    pub fn with_base_url(base_url: &str, access_token: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    fn content_url(&self, message_id: &str) -> String {
        format!("{}/v2/bot/message/{}/content", self.base_url, message_id)
    }
}

#[async_trait]
impl ContentFetcher for LineContentClient {
    async fn fetch(&self, message_id: &str) -> Result<Bytes, LinedropError> {
        let fail = |reason: String| LinedropError::MediaFetch {
            message_id: message_id.to_string(),
            reason,
        };

        let url = self.content_url(message_id);
        debug!(url = %url, "Fetching message content");

        let res = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!(message_id, status = %status, body = %body, "[LINE] content request rejected");
            return Err(fail(format!("status {status}")));
        }

        res.bytes().await.map_err(|e| fail(e.to_string()))
    }
}
