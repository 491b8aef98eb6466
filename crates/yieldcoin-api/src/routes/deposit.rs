//! Deposit USDC into the vault

use axum::{extract::State, http::StatusCode, Json};
use orchestrator::{ApprovalSpec, BalanceRequirement, FeeDecision, SubmitAction, TransferPlan};
use yieldcoin_core::chains::decimals;
use yieldcoin_core::{units, ChainId, Error, ProtocolError};

use crate::dto::{error_response, ApiError, DepositRequest, ErrorResponse, OperationResponse};
use crate::AppState;

/// POST /deposit - Approve USDC to the chain's peer and deposit.
/// Supported only on chains where a peer is deployed.
pub async fn deposit(
    State(state): State<AppState>,
    Json(request): Json<DepositRequest>,
) -> Result<Json<OperationResponse>, ErrorResponse> {
    let chain_id = ChainId::new(request.chain_id);
    let chain = state.chain(chain_id).map_err(error_response)?;

    let peer = chain.peer.ok_or_else(|| {
        error_response(Error::Protocol(ProtocolError::RouteUnsupported {
            role: "peer".into(),
            chain_id: request.chain_id,
        }))
    })?;
    let usdc = chain.usdc.ok_or_else(|| {
        error_response(Error::Protocol(ProtocolError::RouteUnsupported {
            role: "usdc".into(),
            chain_id: request.chain_id,
        }))
    })?;

    let amount = units::parse_units(&request.amount, decimals::USDC).map_err(error_response)?;
    if amount.is_zero() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request("amount must be positive")),
        ));
    }

    let reader = state.reader(chain_id).map_err(error_response)?;
    let plan = TransferPlan {
        operation: "deposit",
        chain_id,
        balance: Some(BalanceRequirement {
            token: usdc,
            required: amount,
        }),
        fee: FeeDecision::NotRequired,
        approval: Some(ApprovalSpec {
            token: usdc,
            spender: peer,
            amount,
        }),
        actions: vec![SubmitAction {
            label: "deposit",
            to: peer,
            data: peer::bindings::deposit_call(amount),
            value: Default::default(),
        }],
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
