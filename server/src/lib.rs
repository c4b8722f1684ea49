//! HTTP adapter for the scan engine.
//!
//! Exposes `GET /scan` for the UI and `GET /health` for probes. Every scan
//! request runs its own orchestration; in-flight scans are tracked in
//! [`registry::ActiveScans`] so they can be aborted by id.

pub mod errors;
pub mod handlers;
pub mod registry;
pub mod state;

use std::net::SocketAddr;

use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/scan", get(handlers::scan::scan))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on `addr` until Ctrl-C, then cancels every scan still running.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr().context("listener has no local address")?;
    info!(addr = %local, "listening");

    let active = state.active.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %err, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            let cancelled = active.cancel_all();
            info!(cancelled, "shutting down");
        })
        .await
        .context("server terminated unexpectedly")
}
