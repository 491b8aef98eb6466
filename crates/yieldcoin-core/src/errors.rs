//! Error types for the YieldCoin client

use thiserror::Error;

/// Top-level errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// JSON-RPC transport and node errors
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("RPC unreachable at {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("RPC returned error {code}: {message}")]
    NodeError { code: i64, message: String },

    #[error("Failed to parse RPC response: {0}")]
    ParseError(String),

    #[error("Node reports chain id {actual}, expected {expected}")]
    ChainIdMismatch { expected: u64, actual: u64 },

    #[error("Execution reverted: {data}")]
    Reverted { data: String },

    #[error("No receipt for {tx_hash} after {waited_secs}s")]
    ConfirmationTimeout { tx_hash: String, waited_secs: u64 },

    #[error("Request timed out after {0}s")]
    Timeout(u64),
}

/// Wallet capability errors
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("No wallet connected")]
    NotConnected,

    #[error("User rejected the request: {0}")]
    Rejected(String),

    #[error("Wallet refused chain switch to {chain_id}: {message}")]
    SwitchRefused { chain_id: u64, message: String },

    #[error("Wallet agent unreachable: {0}")]
    AgentUnreachable(String),

    #[error("Wallet agent returned malformed response: {0}")]
    AgentResponse(String),
}

/// Protocol-level errors (vault, bridge, routing)
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Chain {chain_id} is not in the registry")]
    UnknownChain { chain_id: u64 },

    #[error("{role} is not deployed on chain {chain_id}")]
    RouteUnsupported { role: String, chain_id: u64 },

    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Insufficient balance: need {required}, have {available}")]
    InsufficientBalance { required: String, available: String },

    #[error("Fee estimate unavailable: {reason}")]
    EstimateFailed { reason: String },

    #[error("Fee estimate is stale; re-quote before submitting")]
    StaleEstimate,

    #[error("Vault has no outstanding shares; withdrawal preview unavailable")]
    NoShares,

    #[error("Approval confirmed but allowance still below {required}")]
    ApprovalNotEffective { required: String },

    #[error("No message-id event from {contract} found in receipt for {tx_hash}")]
    MessageIdNotFound { contract: String, tx_hash: String },

    #[error("Another operation is already in flight")]
    Busy,

    #[error("Failed to decode contract response: {message}")]
    DecodeError { message: String },
}

/// Result type alias for YieldCoin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Classification driving orchestrator recovery behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Wallet declined; operation abandoned cleanly, no retry
    UserRejected,
    /// Transient transport failure; safe to retry
    Network,
    /// On-chain revert; not retryable without changing inputs
    ContractRevert,
    /// Asked for a chain/contract pair the registry does not carry
    UnsupportedRoute,
    /// Quote no longer valid; re-estimate required
    StaleEstimate,
    Unknown,
}

impl Error {
    /// Classify for recovery: what the orchestrator (and the UI behind it)
    /// should do next.
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Wallet(WalletError::Rejected(_)) => ErrorClass::UserRejected,
            Error::Wallet(WalletError::NotConnected) => ErrorClass::UserRejected,
            Error::Wallet(_) => ErrorClass::Network,
            Error::Rpc(RpcError::Reverted { .. }) => ErrorClass::ContractRevert,
            Error::Rpc(_) => ErrorClass::Network,
            Error::Protocol(ProtocolError::UnknownChain { .. })
            | Error::Protocol(ProtocolError::RouteUnsupported { .. }) => {
                ErrorClass::UnsupportedRoute
            }
            Error::Protocol(ProtocolError::StaleEstimate) => ErrorClass::StaleEstimate,
            Error::Protocol(_) => ErrorClass::Unknown,
            Error::Config(_) | Error::Serialization(_) => ErrorClass::Unknown,
        }
    }

    /// Machine-readable error code for the HTTP surface
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Rpc(RpcError::Unreachable { .. }) => "rpc_unreachable",
            Error::Rpc(RpcError::NodeError { .. }) => "rpc_node_error",
            Error::Rpc(RpcError::ParseError(_)) => "rpc_parse_error",
            Error::Rpc(RpcError::ChainIdMismatch { .. }) => "chain_id_mismatch",
            Error::Rpc(RpcError::Reverted { .. }) => "execution_reverted",
            Error::Rpc(RpcError::ConfirmationTimeout { .. }) => "confirmation_timeout",
            Error::Rpc(RpcError::Timeout(_)) => "rpc_timeout",
            Error::Wallet(WalletError::NotConnected) => "wallet_not_connected",
            Error::Wallet(WalletError::Rejected(_)) => "user_rejected",
            Error::Wallet(WalletError::SwitchRefused { .. }) => "chain_switch_refused",
            Error::Wallet(WalletError::AgentUnreachable(_)) => "wallet_agent_unreachable",
            Error::Wallet(WalletError::AgentResponse(_)) => "wallet_agent_response",
            Error::Protocol(ProtocolError::UnknownChain { .. }) => "unknown_chain",
            Error::Protocol(ProtocolError::RouteUnsupported { .. }) => "route_unsupported",
            Error::Protocol(ProtocolError::InvalidAmount { .. }) => "invalid_amount",
            Error::Protocol(ProtocolError::InsufficientBalance { .. }) => "insufficient_balance",
            Error::Protocol(ProtocolError::EstimateFailed { .. }) => "estimate_failed",
            Error::Protocol(ProtocolError::StaleEstimate) => "stale_estimate",
            Error::Protocol(ProtocolError::NoShares) => "no_shares",
            Error::Protocol(ProtocolError::ApprovalNotEffective { .. }) => {
                "approval_not_effective"
            }
            Error::Protocol(ProtocolError::MessageIdNotFound { .. }) => "message_id_not_found",
            Error::Protocol(ProtocolError::Busy) => "operation_in_flight",
            Error::Protocol(ProtocolError::DecodeError { .. }) => "decode_error",
            Error::Config(_) => "config_error",
            Error::Serialization(_) => "serialization_error",
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Protocol(ProtocolError::InvalidAmount { .. }) => 400,
            Error::Protocol(ProtocolError::UnknownChain { .. })
            | Error::Protocol(ProtocolError::RouteUnsupported { .. }) => 404,
            Error::Protocol(ProtocolError::InsufficientBalance { .. })
            | Error::Protocol(ProtocolError::StaleEstimate)
            | Error::Protocol(ProtocolError::NoShares)
            | Error::Wallet(WalletError::NotConnected) => 422,
            Error::Protocol(ProtocolError::Busy) => 409,
            Error::Rpc(RpcError::Timeout(_)) | Error::Rpc(RpcError::ConfirmationTimeout { .. }) => {
                504
            }
            Error::Rpc(RpcError::Unreachable { .. }) => 502,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_classifies_as_user_rejected() {
        let err = Error::Wallet(WalletError::Rejected("denied in wallet".into()));
        assert_eq!(err.class(), ErrorClass::UserRejected);
        assert_eq!(err.error_code(), "user_rejected");
    }

    #[test]
    fn test_revert_classifies_as_contract_revert() {
        let err = Error::Rpc(RpcError::Reverted { data: "0x08c379a0".into() });
        assert_eq!(err.class(), ErrorClass::ContractRevert);
    }

    #[test]
    fn test_missing_route_is_unsupported_not_500() {
        let err = Error::Protocol(ProtocolError::RouteUnsupported {
            role: "peer".into(),
            chain_id: 84532,
        });
        assert_eq!(err.class(), ErrorClass::UnsupportedRoute);
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_confirmation_timeout_is_recoverable_network() {
        let err = Error::Rpc(RpcError::ConfirmationTimeout {
            tx_hash: "0xabc".into(),
            waited_secs: 180,
        });
        assert_eq!(err.class(), ErrorClass::Network);
        assert_eq!(err.status_code(), 504);
    }
}
