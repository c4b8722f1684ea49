use std::net::SocketAddr;

use tracing::info;
use vision_common::config::Config;
use vision_server::AppState;

pub async fn serve(addr: SocketAddr, cfg: &Config) -> anyhow::Result<()> {
    info!(
        scanner = %cfg.scanner_path.display(),
        artifacts = %cfg.artifact_dir.display(),
        enrich_vendors = cfg.enrich_vendors,
        "scan engine configured"
    );
    vision_server::serve(addr, AppState::from_config(cfg)).await
}
