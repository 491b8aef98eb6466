//! Portfolio balances across all supported chains

use std::sync::Arc;

use alloy_primitives::Address;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use evm_client::ChainReader;
use yieldcoin_core::chains::{decimals, SUPPORTED_CHAINS};
use yieldcoin_core::units;

use crate::dto::{ApiError, BalanceView, ChainBalances, ErrorResponse, PortfolioResponse};
use crate::AppState;

/// GET /portfolio/:address - Token balances per chain.
/// A failed read on one chain is reported for that chain; the other
/// chains still answer. Nothing is ever reported as zero on error.
pub async fn portfolio(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<PortfolioResponse>, ErrorResponse> {
    let owner: Address = address.parse().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request(format!("invalid address: {e}"))),
        )
    })?;

    let mut chains = Vec::with_capacity(SUPPORTED_CHAINS.len());
    for chain in SUPPORTED_CHAINS {
        let reader = match state.reader(chain.id) {
            Ok(reader) => reader,
            Err(err) => {
                let view = BalanceView::Unavailable {
                    error: err.to_string(),
                };
                chains.push(ChainBalances {
                    chain_id: chain.id,
                    chain_name: chain.name,
                    usdc: view.clone(),
                    yield_token: view,
                });
                continue;
            }
        };
        chains.push(ChainBalances {
            chain_id: chain.id,
            chain_name: chain.name,
            usdc: read_balance(&reader, chain.usdc, owner, decimals::USDC).await,
            yield_token: read_balance(&reader, chain.yield_token, owner, decimals::YIELD_TOKEN)
                .await,
        });
    }

    Ok(Json(PortfolioResponse {
        address: owner.to_string(),
        chains,
    }))
}

async fn read_balance(
    reader: &Arc<dyn ChainReader>,
    token: Option<Address>,
    owner: Address,
    token_decimals: u8,
) -> BalanceView {
    let Some(token) = token else {
        return BalanceView::Unavailable {
            error: "token not deployed on this chain".to_string(),
        };
    };
    match reader.balance_of(token, owner).await {
        Ok(raw) => BalanceView::Known {
            formatted: units::format_units(raw, token_decimals),
            raw: raw.to_string(),
        },
        Err(err) => {
            tracing::warn!(chain = %reader.chain_id(), %token, error = %err, "balance read failed");
            BalanceView::Unavailable {
                error: err.to_string(),
            }
        }
    }
}
