//! Yield market data (informational)

use axum::{extract::State, Json};
use yields::{format_apy, format_tvl};

use crate::dto::{error_response, ErrorResponse, YieldsResponse};
use crate::AppState;

/// GET /yields - Aggregate lending-market data for the deposit view.
/// Never consulted by any transaction path.
pub async fn market_summary(
    State(state): State<AppState>,
) -> Result<Json<YieldsResponse>, ErrorResponse> {
    let summary = state
        .yields_client()
        .market_summary()
        .await
        .map_err(error_response)?;

    Ok(Json(YieldsResponse {
        total_tvl_formatted: format_tvl(summary.total_tvl),
        weighted_apy_formatted: format_apy(summary.weighted_apy),
        total_tvl: summary.total_tvl,
        weighted_apy: summary.weighted_apy,
        pool_count: summary.pool_count,
        usdc_apy: summary.usdc_pool.map(|p| p.apy),
    }))
}
