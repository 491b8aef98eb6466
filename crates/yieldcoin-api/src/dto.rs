//! Data Transfer Objects for API requests and responses

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use yieldcoin_core::{ChainId, Error};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

pub type ErrorResponse = (StatusCode, Json<ApiError>);

/// Map a core error onto the HTTP surface
pub fn error_response(err: Error) -> ErrorResponse {
    (
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ApiError::new(err.error_code(), err.to_string())),
    )
}

/// One token balance on one chain: a value or the reason it is unknown,
/// never a defaulted zero
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BalanceView {
    Known { raw: String, formatted: String },
    Unavailable { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainBalances {
    pub chain_id: ChainId,
    pub chain_name: &'static str,
    pub usdc: BalanceView,
    pub yield_token: BalanceView,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioResponse {
    pub address: String,
    pub chains: Vec<ChainBalances>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepositRequest {
    pub chain_id: u64,
    /// Human decimal USDC amount, e.g. "50" or "12.5"
    pub amount: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawRequest {
    /// Human decimal share amount (18 decimals)
    pub share_amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawPreviewResponse {
    pub share_amount: String,
    pub asset_amount: String,
    pub asset_amount_formatted: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeRequest {
    pub source_chain_id: u64,
    pub dest_chain_id: u64,
    /// Human decimal token amount
    pub amount: String,
    /// Proceed even when the fee quote failed; default false
    #[serde(default)]
    pub acknowledge_fee_failure: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeeQuoteResponse {
    pub fee_raw: String,
    pub fee_formatted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationResponse {
    pub status_id: String,
    pub tx_hashes: Vec<String>,
    pub message_id: Option<String>,
}

impl From<orchestrator::OperationOutcome> for OperationResponse {
    fn from(outcome: orchestrator::OperationOutcome) -> Self {
        Self {
            status_id: outcome.status_id,
            tx_hashes: outcome.tx_hashes.iter().map(|h| h.to_string()).collect(),
            message_id: outcome.message_id.map(|m| m.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageStatusQuery {
    pub source_chain_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct YieldsResponse {
    pub total_tvl: f64,
    pub total_tvl_formatted: String,
    pub weighted_apy: f64,
    pub weighted_apy_formatted: String,
    pub pool_count: usize,
    pub usdc_apy: Option<f64>,
}
