//! Active vault strategy (informational)

use axum::{extract::State, Json};
use peer::PeerClient;
use serde::Serialize;
use yieldcoin_core::chains;

use crate::AppState;

/// Informational: a failed read is "unavailable", never a guess and
/// never a request failure
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StrategyView {
    Available(peer::ActiveStrategy),
    Unavailable { error: String },
}

/// GET /strategy - Where the vault currently deploys funds
pub async fn active_strategy(State(state): State<AppState>) -> Json<StrategyView> {
    let view = match strategy_read(&state).await {
        Ok(strategy) => StrategyView::Available(strategy),
        Err(error) => {
            tracing::warn!(%error, "strategy read failed");
            StrategyView::Unavailable { error }
        }
    };
    Json(view)
}

async fn strategy_read(state: &AppState) -> Result<peer::ActiveStrategy, String> {
    let parent =
        chains::parent_chain().ok_or_else(|| "no parent chain in the registry".to_string())?;
    let peer_addr = parent
        .peer
        .ok_or_else(|| "no peer on the parent chain".to_string())?;
    let reader = state.reader(parent.id).map_err(|e| e.to_string())?;
    PeerClient::new(reader, peer_addr)
        .strategy()
        .await
        .map_err(|e| e.to_string())
}
