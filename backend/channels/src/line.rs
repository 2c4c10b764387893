//! LINE webhook endpoint.
//!
//! Verifies `X-Line-Signature` over the raw body, then hands the body to the
//! image ingest pipeline. Responds `200 OK` once the signature checks out,
//! whatever happens downstream, so LINE does not redeliver.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use tracing::{debug, info, warn};

use crate::line_receive::ImageIngest;
use crate::line_signature::verify_signature;

pub const LINE_SIGNATURE_HEADER: &str = "x-line-signature";

#[derive(Clone)]
pub struct LineConfig {
    pub channel_secret: String,
    pub webhook_path: String,
}

struct AppState {
    channel_secret: String,
    ingest: ImageIngest,
}

pub struct LineWebhook {
    config: LineConfig,
    ingest: ImageIngest,
}

impl LineWebhook {
    pub fn new(config: LineConfig, ingest: ImageIngest) -> Self {
        Self { config, ingest }
    }

    pub fn build_router(&self) -> Router {
        let state = Arc::new(AppState {
            channel_secret: self.config.channel_secret.clone(),
            ingest: self.ingest.clone(),
        });
        info!("[LINE] Webhook ready at {}", self.config.webhook_path);
        Router::new()
            .route(&self.config.webhook_path, post(callback))
            .with_state(state)
    }
}

async fn callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = headers
        .get(LINE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    debug!(body = %String::from_utf8_lossy(&body), "Request body");

    if verify_signature(&state.channel_secret, &body, signature).is_err() {
        warn!("Invalid signature. Please check your channel access token/channel secret.");
        return (StatusCode::BAD_REQUEST, "Invalid signature");
    }

    match state.ingest.handle_body(&body).await {
        Ok(summary) => debug!(
            events = summary.events,
            saved = summary.saved.len(),
            "Webhook handled"
        ),
        Err(e) => warn!(error = %e, "Discarding webhook payload"),
    }

    (StatusCode::OK, "OK")
}
