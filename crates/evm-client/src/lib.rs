//! evm-client: JSON-RPC client for the supported EVM test networks
//!
//! One `RpcClient` per chain, pooled in `RpcPool`. The client verifies the
//! node's reported `eth_chainId` against the registry id before the first
//! read goes through; a mismatched endpoint is an error, never a silent
//! wrong-chain answer.

pub mod erc20;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use yieldcoin_core::{
    chains::Chain, AppConfig, ChainId, Error, Result, RpcError, TxHash,
};

pub use types::{LogEntry, TxReceipt};

/// Read-side chain access, as the orchestrator consumes it. The production
/// implementation is `RpcClient`; tests substitute mocks.
#[async_trait]
pub trait ChainReader: Send + Sync {
    fn chain_id(&self) -> ChainId;

    /// ERC-20 balance; an error is an unknown balance, not zero
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256>;

    /// ERC-20 allowance granted by `owner` to `spender`
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    /// Raw `eth_call` against a contract
    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>>;

    /// Poll for the receipt of a submitted transaction, bounded by the
    /// configured confirmation timeout
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TxReceipt>;
}

/// JSON-RPC client bound to one registry chain
pub struct RpcClient {
    chain_id: ChainId,
    url: String,
    http: reqwest::Client,
    request_timeout: Duration,
    confirmation_timeout: Duration,
    poll_interval: Duration,
    verified: OnceCell<()>,
}

impl RpcClient {
    pub fn new(chain: &Chain, config: &AppConfig) -> Self {
        Self {
            chain_id: chain.id,
            url: config.rpc_url(chain),
            http: reqwest::Client::new(),
            request_timeout: Duration::from_secs(config.rpc_timeout_secs),
            confirmation_timeout: Duration::from_secs(config.confirmation_timeout_secs),
            poll_interval: Duration::from_secs(config.receipt_poll_interval_secs),
            verified: OnceCell::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw JSON-RPC request with per-request timeout
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let send = self.http.post(&self.url).json(&body).send();
        let response = tokio::time::timeout(self.request_timeout, send)
            .await
            .map_err(|_| RpcError::Timeout(self.request_timeout.as_secs()))?
            .map_err(|e| RpcError::Unreachable {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| RpcError::ParseError(e.to_string()))?;

        if let Some(err) = payload.get("error") {
            let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            // code 3 is the execution-revert convention; some nodes only
            // put "revert" in the message
            if code == 3 || message.to_ascii_lowercase().contains("revert") {
                let data = err
                    .get("data")
                    .and_then(Value::as_str)
                    .unwrap_or(&message)
                    .to_string();
                return Err(Error::Rpc(RpcError::Reverted { data }));
            }
            return Err(Error::Rpc(RpcError::NodeError { code, message }));
        }

        payload
            .get("result")
            .cloned()
            .ok_or_else(|| Error::Rpc(RpcError::ParseError("missing result field".into())))
    }

    /// Verify the node serves the chain this client was built for.
    /// Runs once; every read funnels through it.
    async fn ensure_chain(&self) -> Result<()> {
        self.verified
            .get_or_try_init(|| async {
                let result = self.request("eth_chainId", json!([])).await?;
                let actual = parse_hex_u64(&result)?;
                if actual != self.chain_id.as_u64() {
                    return Err(Error::Rpc(RpcError::ChainIdMismatch {
                        expected: self.chain_id.as_u64(),
                        actual,
                    }));
                }
                tracing::debug!(chain_id = actual, url = %self.url, "rpc endpoint verified");
                Ok(())
            })
            .await
            .copied()
    }

    async fn eth_call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>> {
        self.ensure_chain().await?;
        let params = json!([
            { "to": to.to_string(), "data": format!("0x{}", alloy_primitives::hex::encode(data)) },
            "latest",
        ]);
        let result = self.request("eth_call", params).await?;
        let hex_str = result
            .as_str()
            .ok_or_else(|| Error::Rpc(RpcError::ParseError("eth_call result not a string".into())))?;
        alloy_primitives::hex::decode(hex_str)
            .map_err(|e| Error::Rpc(RpcError::ParseError(format!("eth_call result: {e}"))))
    }

    async fn receipt(&self, tx_hash: TxHash) -> Result<Option<TxReceipt>> {
        self.ensure_chain().await?;
        let result = self
            .request("eth_getTransactionReceipt", json!([tx_hash.to_string()]))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        types::parse_receipt(&result).map(Some)
    }
}

#[async_trait]
impl ChainReader for RpcClient {
    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        let data = erc20::balance_of_call(owner);
        let raw = self.eth_call(token, &data).await?;
        erc20::decode_u256(&raw)
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        let data = erc20::allowance_call(owner, spender);
        let raw = self.eth_call(token, &data).await?;
        erc20::decode_u256(&raw)
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>> {
        self.eth_call(to, &data).await
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TxReceipt> {
        let deadline = tokio::time::Instant::now() + self.confirmation_timeout;
        loop {
            if let Some(receipt) = self.receipt(tx_hash).await? {
                if !receipt.status {
                    return Err(Error::Rpc(RpcError::Reverted {
                        data: format!("transaction {tx_hash} reverted"),
                    }));
                }
                return Ok(receipt);
            }
            if tokio::time::Instant::now() + self.poll_interval > deadline {
                return Err(Error::Rpc(RpcError::ConfirmationTimeout {
                    tx_hash: tx_hash.to_string(),
                    waited_secs: self.confirmation_timeout.as_secs(),
                }));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// One client per supported chain, built lazily from config
pub struct RpcPool {
    clients: Vec<Arc<RpcClient>>,
}

impl RpcPool {
    pub fn new(config: &AppConfig) -> Self {
        let clients = yieldcoin_core::chains::SUPPORTED_CHAINS
            .iter()
            .map(|chain| Arc::new(RpcClient::new(chain, config)))
            .collect();
        Self { clients }
    }

    pub fn client(&self, chain_id: ChainId) -> Option<Arc<RpcClient>> {
        self.clients.iter().find(|c| c.chain_id == chain_id).cloned()
    }

    pub fn reader(&self, chain_id: ChainId) -> Option<Arc<dyn ChainReader>> {
        let client = self.client(chain_id)?;
        Some(client)
    }
}

fn parse_hex_u64(value: &Value) -> Result<u64> {
    let s = value
        .as_str()
        .ok_or_else(|| Error::Rpc(RpcError::ParseError("expected hex string".into())))?;
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(stripped, 16)
        .map_err(|e| Error::Rpc(RpcError::ParseError(format!("hex u64 {s}: {e}"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_u64() {
        assert_eq!(parse_hex_u64(&json!("0xa869")).unwrap(), 43113);
        assert_eq!(parse_hex_u64(&json!("0x1")).unwrap(), 1);
        assert!(parse_hex_u64(&json!(12)).is_err());
        assert!(parse_hex_u64(&json!("0xzz")).is_err());
    }

    #[test]
    fn test_pool_covers_registry() {
        let pool = RpcPool::new(&AppConfig::default());
        for chain in yieldcoin_core::chains::SUPPORTED_CHAINS {
            assert!(pool.client(chain.id).is_some());
        }
        assert!(pool.client(ChainId::new(1)).is_none());
    }
}
