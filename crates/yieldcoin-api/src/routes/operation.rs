//! Current-operation status and error dismissal

use axum::{extract::State, http::StatusCode, Json};
use orchestrator::OperationStatus;

use crate::dto::{ApiError, ErrorResponse};
use crate::AppState;

/// GET /operation - Status of the most recent operation
pub async fn current(
    State(state): State<AppState>,
) -> Result<Json<OperationStatus>, ErrorResponse> {
    state.engine().status().await.map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new("no_operation", "no operation has run yet")),
        )
    })
}

/// POST /operation/dismiss - Clear a displayed error, returning the
/// operation to the phase the error interrupted
pub async fn dismiss(State(state): State<AppState>) -> StatusCode {
    state.engine().dismiss_error().await;
    StatusCode::NO_CONTENT
}
