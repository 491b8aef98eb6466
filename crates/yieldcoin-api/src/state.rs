//! Application state shared across API handlers

use std::sync::Arc;

use alloy_primitives::keccak256;
use ccip::StatusClient;
use evm_client::{ChainReader, RpcPool};
use orchestrator::Engine;
use wallet::{AgentWallet, Disconnected, WalletConnector};
use yieldcoin_core::{
    chains, AppConfig, ChainId, Error, ProtocolError, Result, B256,
};
use yields::YieldsClient;

struct Inner {
    config: AppConfig,
    pool: RpcPool,
    wallet: Arc<dyn WalletConnector>,
    engine: Engine,
    status_client: StatusClient,
    yields_client: YieldsClient,
    /// topic0 of the configured bridge MessageSent signature
    message_topic: B256,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let wallet: Arc<dyn WalletConnector> = match &config.wallet_agent_url {
            Some(url) => {
                tracing::info!(%url, "using external wallet agent");
                Arc::new(AgentWallet::new(url.clone()))
            }
            None => {
                tracing::warn!("no wallet agent configured; mutating operations will fail");
                Arc::new(Disconnected)
            }
        };
        let pool = RpcPool::new(&config);
        let engine = Engine::new(wallet.clone());
        let status_client = StatusClient::new(config.status_endpoint.clone());
        let yields_client = YieldsClient::new(config.yields_endpoint.clone());
        let message_topic = keccak256(config.message_sent_signature.as_bytes());
        Self {
            inner: Arc::new(Inner {
                config,
                pool,
                wallet,
                engine,
                status_client,
                yields_client,
                message_topic,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn wallet(&self) -> &Arc<dyn WalletConnector> {
        &self.inner.wallet
    }

    pub fn engine(&self) -> &Engine {
        &self.inner.engine
    }

    pub fn status_client(&self) -> &StatusClient {
        &self.inner.status_client
    }

    pub fn yields_client(&self) -> &YieldsClient {
        &self.inner.yields_client
    }

    pub fn message_topic(&self) -> B256 {
        self.inner.message_topic
    }

    /// Reader for a registry chain; off-registry ids are an error
    pub fn reader(&self, chain_id: ChainId) -> Result<Arc<dyn ChainReader>> {
        self.inner.pool.reader(chain_id).ok_or_else(|| {
            Error::Protocol(ProtocolError::UnknownChain {
                chain_id: chain_id.as_u64(),
            })
        })
    }

    /// Registry chain for an id, as an API-level error when unknown
    pub fn chain(&self, chain_id: ChainId) -> Result<&'static chains::Chain> {
        chains::resolve_chain(chain_id).ok_or_else(|| {
            Error::Protocol(ProtocolError::UnknownChain {
                chain_id: chain_id.as_u64(),
            })
        })
    }
}
