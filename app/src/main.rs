//! yieldcoin: start the local API server

use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use yieldcoin_api::AppState;
use yieldcoin_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            tracing::info!(path = %path.display(), "loading config");
            AppConfig::load(&path).with_context(|| format!("loading {}", path.display()))?
        }
        None => AppConfig::default(),
    };

    let state = AppState::new(config);
    yieldcoin_api::start_server(state)
        .await
        .context("api server failed")?;
    Ok(())
}
