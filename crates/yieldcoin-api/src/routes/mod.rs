//! API route handlers

pub mod balances;
pub mod bridge;
pub mod chains;
pub mod deposit;
pub mod health;
pub mod market;
pub mod message;
pub mod operation;
pub mod strategy;
pub mod withdraw;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/chains", get(chains::list_chains))
        .route("/portfolio/:address", get(balances::portfolio))
        .route("/deposit", post(deposit::deposit))
        .route("/withdraw/preview", get(withdraw::preview))
        .route("/withdraw", post(withdraw::withdraw))
        .route("/bridge", post(bridge::bridge_yieldcoin))
        .route("/bridge/usdc", post(bridge::bridge_usdc))
        .route("/strategy", get(strategy::active_strategy))
        .route("/operation", get(operation::current))
        .route("/operation/dismiss", post(operation::dismiss))
        .route("/message/:message_id/status", get(message::message_status))
        .route("/yields", get(market::market_summary))
        .with_state(state)
}
