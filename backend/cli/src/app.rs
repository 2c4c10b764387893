use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use linedrop_channels::{ImageIngest, LineConfig, LineContentClient, LineWebhook};
use linedrop_config::{mask_secret, Credentials, Settings};
use linedrop_core::LinedropError;
use linedrop_media::DiskImageStore;
use tracing::{error, info};

/// A bound, fully wired webhook server.
pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn serve(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .await
            .context("webhook server exited")
    }
}

/// Build the router for `settings`. No I/O happens here.
pub fn build_router(settings: &Settings, credentials: &Credentials) -> Router {
    let fetcher = LineContentClient::with_base_url(
        &settings.content_api_base,
        &credentials.channel_access_token,
    );
    let store = DiskImageStore::new(&settings.save_dir);
    let ingest = ImageIngest::new(Arc::new(fetcher), Arc::new(store));

    LineWebhook::new(
        LineConfig {
            channel_secret: credentials.channel_secret.clone(),
            webhook_path: settings.webhook_path.clone(),
        },
        ingest,
    )
    .build_router()
}

/// Create the save directory and bind the listener.
pub async fn prepare(settings: &Settings, credentials: &Credentials) -> Result<Server> {
    DiskImageStore::new(&settings.save_dir)
        .ensure_dir()
        .await
        .with_context(|| format!("failed to create {}", settings.save_dir.display()))?;

    let listener = TcpListener::bind(&settings.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_address))?;

    Ok(Server {
        listener,
        router: build_router(settings, credentials),
    })
}

/// Resolve credentials, then create the save directory and bind.
///
/// Credentials come first: without them neither `Save_Path` nor the port is touched.
pub async fn start<F>(settings: &Settings, load_credentials: F) -> Result<Server>
where
    F: FnOnce() -> Result<Credentials, LinedropError>,
{
    let credentials = load_credentials().inspect_err(|e| {
        error!(error = %e, "Cannot start without LINE channel credentials");
    })?;
    info!(
        channel_secret = %mask_secret(&credentials.channel_secret),
        channel_access_token = %mask_secret(&credentials.channel_access_token),
        "Loaded LINE channel credentials"
    );

    prepare(settings, &credentials).await
}
