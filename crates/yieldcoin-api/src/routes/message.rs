//! On-demand cross-chain message status

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use ccip::MessageStatus;
use yieldcoin_core::{chains, ChainId, MessageId};

use crate::dto::{error_response, ApiError, ErrorResponse, MessageStatusQuery};
use crate::AppState;

/// GET /message/:message_id/status?source_chain_id=... - One status
/// lookup, no background polling
pub async fn message_status(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    Query(query): Query<MessageStatusQuery>,
) -> Result<Json<MessageStatus>, ErrorResponse> {
    let raw: yieldcoin_core::B256 = message_id.parse().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request(format!("invalid message id: {e}"))),
        )
    })?;
    let message_id = MessageId::new(raw);

    let selector = chains::resolve_selector(ChainId::new(query.source_chain_id)).ok_or_else(
        || {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::new(
                    "unknown_chain",
                    format!("chain {} is not in the registry", query.source_chain_id),
                )),
            )
        },
    )?;

    let status = state
        .status_client()
        .message_status(message_id, selector)
        .await
        .map_err(error_response)?;
    Ok(Json(status))
}
