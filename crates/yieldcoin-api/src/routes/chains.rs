//! Registry listing

use axum::Json;
use yieldcoin_core::chains::{Chain, SUPPORTED_CHAINS};

/// GET /chains - List supported chains and their deployments
pub async fn list_chains() -> Json<&'static [Chain]> {
    Json(SUPPORTED_CHAINS)
}
