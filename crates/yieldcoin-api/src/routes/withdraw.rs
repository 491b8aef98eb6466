//! Withdraw from the vault (parent chain only)
//!
//! Two sequential transactions: transfer the shares to the ParentPeer,
//! then call `withdraw` to burn them and release USDC.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use orchestrator::{BalanceRequirement, FeeDecision, SubmitAction, TransferPlan};
use peer::{preview_withdrawal, PeerClient};
use yieldcoin_core::chains::{self, decimals};
use yieldcoin_core::{units, Error, ProtocolError};

use crate::dto::{
    error_response, ApiError, ErrorResponse, OperationResponse, WithdrawPreviewResponse,
    WithdrawRequest,
};
use crate::AppState;

fn parent_contracts() -> Result<
    (
        &'static chains::Chain,
        alloy_primitives::Address,
        alloy_primitives::Address,
    ),
    ErrorResponse,
> {
    let parent = chains::parent_chain().ok_or_else(|| {
        error_response(Error::Config("no parent chain in the registry".into()))
    })?;
    let peer_addr = parent.peer.ok_or_else(|| {
        error_response(Error::Protocol(ProtocolError::RouteUnsupported {
            role: "peer".into(),
            chain_id: parent.id.as_u64(),
        }))
    })?;
    let share_token = parent.yield_token.ok_or_else(|| {
        error_response(Error::Protocol(ProtocolError::RouteUnsupported {
            role: "yield_token".into(),
            chain_id: parent.id.as_u64(),
        }))
    })?;
    Ok((parent, peer_addr, share_token))
}

/// GET /withdraw/preview?share_amount=... - What a share burn would pay
/// out right now. Uses the vault's own truncating arithmetic.
pub async fn preview(
    State(state): State<AppState>,
    Query(request): Query<WithdrawRequest>,
) -> Result<Json<WithdrawPreviewResponse>, ErrorResponse> {
    let (parent, peer_addr, _) = parent_contracts()?;
    let share_amount = units::parse_units(&request.share_amount, decimals::YIELD_TOKEN)
        .map_err(error_response)?;

    let reader = state.reader(parent.id).map_err(error_response)?;
    let client = PeerClient::new(reader, peer_addr);
    let totals = client.totals().await.map_err(error_response)?;
    let preview = preview_withdrawal(totals.total_value, totals.total_shares, share_amount)
        .map_err(error_response)?;

    Ok(Json(WithdrawPreviewResponse {
        share_amount: preview.share_amount.to_string(),
        asset_amount: preview.asset_amount.to_string(),
        asset_amount_formatted: units::format_units(preview.asset_amount, decimals::USDC),
    }))
}

/// POST /withdraw - Run the two-step withdrawal on the parent chain
pub async fn withdraw(
    State(state): State<AppState>,
    Json(request): Json<WithdrawRequest>,
) -> Result<Json<OperationResponse>, ErrorResponse> {
    let (parent, peer_addr, share_token) = parent_contracts()?;
    let share_amount = units::parse_units(&request.share_amount, decimals::YIELD_TOKEN)
        .map_err(error_response)?;
    if share_amount.is_zero() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request("share amount must be positive")),
        ));
    }

    let reader = state.reader(parent.id).map_err(error_response)?;
    let plan = TransferPlan {
        operation: "withdraw",
        chain_id: parent.id,
        balance: Some(BalanceRequirement {
            token: share_token,
            required: share_amount,
        }),
        fee: FeeDecision::NotRequired,
        approval: None,
        actions: vec![
            SubmitAction {
                label: "transfer_shares",
                to: share_token,
                data: evm_client::erc20::transfer_call(peer_addr, share_amount),
                value: Default::default(),
            },
            SubmitAction {
                label: "withdraw",
                to: peer_addr,
                data: peer::bindings::withdraw_call(share_amount),
                value: Default::default(),
            },
        ],
        message_event: None,
        cross_chain: false,
    };

    let outcome = state
        .engine()
        .execute(reader, plan)
        .await
        .map_err(error_response)?;
    Ok(Json(outcome.into()))
}
