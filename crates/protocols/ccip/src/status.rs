//! On-demand cross-chain message status lookup
//!
//! A single GET against the configured status endpoint per request; no
//! background polling. Unrecognized status strings are reported verbatim
//! as unknown, never mapped to a success or failure they don't state.

use serde::{Deserialize, Serialize};
use yieldcoin_core::{Error, MessageId, Result, RpcError};

/// Lifecycle of a cross-chain message, as the status service reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum MessageStatus {
    /// Source transaction seen, waiting for finality
    Pending,
    /// Committed, en route to the destination
    InFlight,
    /// Executed on the destination chain
    Delivered,
    Failed,
    /// Service answered with something this client does not recognize
    Unknown(String),
}

impl MessageStatus {
    /// Map a service status string. Matching is case-insensitive; anything
    /// unrecognized is kept verbatim.
    pub fn from_service(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" | "waiting_for_finality" | "source_finalized" => Self::Pending,
            "in_flight" | "inflight" | "committed" | "blessed" => Self::InFlight,
            "delivered" | "success" | "executed" => Self::Delivered,
            "failed" | "execution_failed" | "reverted" => Self::Failed,
            _ => Self::Unknown(raw.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
}

pub struct StatusClient {
    base_url: String,
    http: reqwest::Client,
}

impl StatusClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub async fn message_status(
        &self,
        message_id: MessageId,
        source_selector: u64,
    ) -> Result<MessageStatus> {
        let url = format!(
            "{}/message/{message_id}?sourceChainSelector={source_selector}",
            self.base_url.trim_end_matches('/'),
        );
        tracing::debug!(%message_id, source_selector, "querying message status");
        let response = self.http.get(&url).send().await.map_err(|e| {
            Error::Rpc(RpcError::Unreachable {
                url: url.clone(),
                message: e.to_string(),
            })
        })?;
        let parsed: StatusResponse = response
            .json()
            .await
            .map_err(|e| Error::Rpc(RpcError::ParseError(e.to_string())))?;
        Ok(MessageStatus::from_service(&parsed.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_states_map() {
        assert_eq!(MessageStatus::from_service("SUCCESS"), MessageStatus::Delivered);
        assert_eq!(MessageStatus::from_service("committed"), MessageStatus::InFlight);
        assert_eq!(MessageStatus::from_service("waiting_for_finality"), MessageStatus::Pending);
        assert_eq!(MessageStatus::from_service("FAILED"), MessageStatus::Failed);
    }

    #[test]
    fn test_unknown_state_kept_verbatim_never_success() {
        let status = MessageStatus::from_service("CURSED");
        assert_eq!(status, MessageStatus::Unknown("CURSED".to_string()));
        assert_ne!(status, MessageStatus::Delivered);
    }
}
