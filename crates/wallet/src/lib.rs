//! wallet: the signing seam
//!
//! The client never holds keys. `WalletConnector` is the capability the
//! orchestrator drives: report the connected address and active chain,
//! request a chain switch, and hand a prepared transaction to the key
//! holder for signing and broadcast. The production implementation
//! (`AgentWallet`) forwards each request as JSON to an external wallet
//! agent; a rejection there is a clean `UserRejected`, not a failure.

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use yieldcoin_core::{ChainId, Error, Result, TxHash, WalletError};

/// A transaction prepared by the client, ready for signing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub chain_id: ChainId,
    pub from: Address,
    pub to: Address,
    /// ABI-encoded calldata
    pub data: Bytes,
    /// Native value attached (CCIP fees are paid this way)
    pub value: U256,
}

#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Connected account address
    async fn address(&self) -> Result<Address>;

    /// Chain the wallet is currently on
    async fn active_chain_id(&self) -> Result<ChainId>;

    /// Ask the wallet to switch chains; the wallet may refuse
    async fn switch_chain(&self, chain_id: ChainId) -> Result<()>;

    /// Sign and broadcast; returns the transaction hash
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash>;
}

/// Wire format of the agent's answer to any request
#[derive(Debug, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum AgentResponse<T> {
    Ok { result: T },
    Rejected { reason: String },
    Error { message: String },
}

/// Forwards wallet requests to an external agent over HTTP
pub struct AgentWallet {
    endpoint: String,
    http: reqwest::Client,
}

impl AgentWallet {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            http: reqwest::Client::new(),
        }
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}/{path}", self.endpoint.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::AgentUnreachable(e.to_string()))?;
        let parsed: AgentResponse<T> = response
            .json()
            .await
            .map_err(|e| WalletError::AgentResponse(e.to_string()))?;
        match parsed {
            AgentResponse::Ok { result } => Ok(result),
            AgentResponse::Rejected { reason } => {
                tracing::info!(%reason, "wallet agent rejected request");
                Err(Error::Wallet(WalletError::Rejected(reason)))
            }
            AgentResponse::Error { message } => {
                Err(Error::Wallet(WalletError::AgentResponse(message)))
            }
        }
    }
}

#[async_trait]
impl WalletConnector for AgentWallet {
    async fn address(&self) -> Result<Address> {
        let addr: String = self.post("address", serde_json::json!({})).await?;
        addr.parse()
            .map_err(|e| Error::Wallet(WalletError::AgentResponse(format!("address: {e}"))))
    }

    async fn active_chain_id(&self) -> Result<ChainId> {
        let id: u64 = self.post("chain", serde_json::json!({})).await?;
        Ok(ChainId::new(id))
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<()> {
        let _: serde_json::Value = self
            .post("switch", serde_json::json!({ "chain_id": chain_id.as_u64() }))
            .await
            .map_err(|e| match e {
                Error::Wallet(WalletError::Rejected(reason)) => {
                    Error::Wallet(WalletError::SwitchRefused {
                        chain_id: chain_id.as_u64(),
                        message: reason,
                    })
                }
                other => other,
            })?;
        Ok(())
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        let body = serde_json::to_value(&tx)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        let hash: String = self.post("send", body).await?;
        let parsed = hash
            .parse()
            .map_err(|e| Error::Wallet(WalletError::AgentResponse(format!("tx hash: {e}"))))?;
        Ok(TxHash::new(parsed))
    }
}

/// Default wallet when no agent is configured: every call fails with
/// `NotConnected`
pub struct Disconnected;

#[async_trait]
impl WalletConnector for Disconnected {
    async fn address(&self) -> Result<Address> {
        Err(Error::Wallet(WalletError::NotConnected))
    }

    async fn active_chain_id(&self) -> Result<ChainId> {
        Err(Error::Wallet(WalletError::NotConnected))
    }

    async fn switch_chain(&self, _chain_id: ChainId) -> Result<()> {
        Err(Error::Wallet(WalletError::NotConnected))
    }

    async fn send_transaction(&self, _tx: TransactionRequest) -> Result<TxHash> {
        Err(Error::Wallet(WalletError::NotConnected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yieldcoin_core::ErrorClass;

    #[tokio::test]
    async fn test_disconnected_fails_every_call() {
        let wallet = Disconnected;
        let err = wallet.address().await.unwrap_err();
        assert_eq!(err.error_code(), "wallet_not_connected");
        assert_eq!(err.class(), ErrorClass::UserRejected);
        assert!(wallet.switch_chain(ChainId::new(43113)).await.is_err());
    }

    #[test]
    fn test_agent_rejection_decodes() {
        let raw = r#"{"outcome": "rejected", "reason": "user closed prompt"}"#;
        let parsed: AgentResponse<String> = serde_json::from_str(raw).unwrap();
        assert!(matches!(parsed, AgentResponse::Rejected { .. }));
    }

    #[test]
    fn test_transaction_request_round_trips() {
        let tx = TransactionRequest {
            chain_id: ChainId::new(43113),
            from: Address::ZERO,
            to: Address::ZERO,
            data: Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]),
            value: U256::ZERO,
        };
        let json = serde_json::to_string(&tx).unwrap();
        let back: TransactionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.chain_id, tx.chain_id);
        assert_eq!(back.data, tx.data);
    }
}
