/// HTTP server module
/// Serves the dashboard, the JSON API and the snapshot WebSocket

pub mod handlers;
pub mod routes;
pub mod static_files;
pub mod view;
pub mod websocket;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use crate::core::{MetricsSampler, SysinfoProvider};
use crate::utils::{Settings, ENDPOINTS};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub sampler: MetricsSampler,
    pub refresh_secs: u64,
}

impl AppState {
    /// `refresh_secs` is clamped to at least one second
    pub fn new(sampler: MetricsSampler, refresh_secs: u64) -> Self {
        Self {
            sampler,
            refresh_secs: refresh_secs.max(1),
        }
    }
}

pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let sampler = MetricsSampler::new(Arc::new(SysinfoProvider::new()));
    let app = create_router(AppState::new(sampler, settings.refresh_secs), settings.cors);

    let bind_address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    let addr: SocketAddr = listener.local_addr().context("Failed to read bound address")?;

    tracing::info!(
        %addr,
        refresh_secs = settings.refresh_secs,
        cors = settings.cors,
        "sysdash listening"
    );
    for (method, path, description) in ENDPOINTS {
        tracing::info!("  {:<4} {:<16} {}", method, path, description);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("sysdash stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
