//! Configuration types for the YieldCoin client

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Per-chain RPC URL overrides (chain id -> URL); registry defaults
    /// are used for chains not listed here
    #[serde(default)]
    pub rpc_overrides: HashMap<u64, String>,

    /// External wallet agent endpoint; absent = disconnected
    #[serde(default)]
    pub wallet_agent_url: Option<String>,

    /// Cross-chain message status endpoint base URL
    #[serde(default = "default_status_endpoint")]
    pub status_endpoint: String,

    /// Yield-data aggregation API endpoint
    #[serde(default = "default_yields_endpoint")]
    pub yields_endpoint: String,

    /// Event signature matched when extracting a message id from a
    /// USDC-bridge receipt
    #[serde(default = "default_message_sent_signature")]
    pub message_sent_signature: String,

    /// Upper bound on waiting for one transaction confirmation
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,

    /// Receipt poll interval while waiting for confirmation
    #[serde(default = "default_receipt_poll_interval_secs")]
    pub receipt_poll_interval_secs: u64,

    /// Per-request RPC timeout
    #[serde(default = "default_rpc_timeout_secs")]
    pub rpc_timeout_secs: u64,
}

fn default_api_port() -> u16 {
    18545
}

fn default_status_endpoint() -> String {
    "https://ccip.chain.link/api/h/atlas".to_string()
}

fn default_yields_endpoint() -> String {
    "https://yields.llama.fi/pools".to_string()
}

fn default_message_sent_signature() -> String {
    "MessageSent(bytes32,uint64,address,uint256,uint256)".to_string()
}

fn default_confirmation_timeout_secs() -> u64 {
    180
}

fn default_receipt_poll_interval_secs() -> u64 {
    3
}

fn default_rpc_timeout_secs() -> u64 {
    15
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            rpc_overrides: HashMap::new(),
            wallet_agent_url: None,
            status_endpoint: default_status_endpoint(),
            yields_endpoint: default_yields_endpoint(),
            message_sent_signature: default_message_sent_signature(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
            receipt_poll_interval_secs: default_receipt_poll_interval_secs(),
            rpc_timeout_secs: default_rpc_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// Effective RPC URL for a chain: override if present, else the
    /// registry default
    pub fn rpc_url(&self, chain: &crate::chains::Chain) -> String {
        self.rpc_overrides
            .get(&chain.id.as_u64())
            .cloned()
            .unwrap_or_else(|| chain.rpc_url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_port, 18545);
        assert_eq!(config.confirmation_timeout_secs, 180);
        assert!(config.wallet_agent_url.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"api_port": 9000, "rpc_overrides": {"43113": "http://localhost:8545"}}"#)
                .unwrap();
        assert_eq!(config.api_port, 9000);
        assert_eq!(config.confirmation_timeout_secs, 180);

        let fuji = chains::resolve_chain(chains::AVALANCHE_FUJI).unwrap();
        assert_eq!(config.rpc_url(fuji), "http://localhost:8545");
        let base = chains::resolve_chain(chains::BASE_SEPOLIA).unwrap();
        assert_eq!(config.rpc_url(base), "https://sepolia.base.org");
    }
}
