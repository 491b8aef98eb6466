//! Vault state reads over a `ChainReader`

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use evm_client::{erc20, ChainReader};
use yieldcoin_core::Result;

use crate::bindings;
use crate::strategy::{decode_strategy, ActiveStrategy};

/// Vault accounting snapshot used by the withdrawal preview
#[derive(Debug, Clone)]
pub struct VaultTotals {
    /// USDC base units under management (`getTotalValue`)
    pub total_value: U256,
    /// Outstanding shares (`getTotalShares`, ParentPeer only)
    pub total_shares: U256,
}

/// Read access to one deployed peer contract
pub struct PeerClient {
    reader: Arc<dyn ChainReader>,
    address: Address,
}

impl PeerClient {
    pub fn new(reader: Arc<dyn ChainReader>, address: Address) -> Self {
        Self { reader, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub async fn total_value(&self) -> Result<U256> {
        let raw = self
            .reader
            .call(self.address, bindings::total_value_call())
            .await?;
        erc20::decode_u256(&raw)
    }

    pub async fn total_shares(&self) -> Result<U256> {
        let raw = self
            .reader
            .call(self.address, bindings::total_shares_call())
            .await?;
        erc20::decode_u256(&raw)
    }

    /// Both totals, as the withdrawal preview needs them. The two reads
    /// go against the same contract; a failure of either makes the
    /// preview unavailable.
    pub async fn totals(&self) -> Result<VaultTotals> {
        let total_value = self.total_value().await?;
        let total_shares = self.total_shares().await?;
        Ok(VaultTotals {
            total_value,
            total_shares,
        })
    }

    pub async fn strategy(&self) -> Result<ActiveStrategy> {
        let raw = self
            .reader
            .call(self.address, bindings::strategy_call())
            .await?;
        decode_strategy(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use yieldcoin_core::{ChainId, Error, RpcError, TxHash};

    /// Answers every call with a fixed word, or errors
    struct FixedReader {
        answer: std::result::Result<U256, ()>,
    }

    #[async_trait]
    impl ChainReader for FixedReader {
        fn chain_id(&self) -> ChainId {
            ChainId::new(43113)
        }

        async fn balance_of(&self, _token: Address, _owner: Address) -> Result<U256> {
            unimplemented!()
        }

        async fn allowance(
            &self,
            _token: Address,
            _owner: Address,
            _spender: Address,
        ) -> Result<U256> {
            unimplemented!()
        }

        async fn call(&self, _to: Address, _data: Vec<u8>) -> Result<Vec<u8>> {
            match self.answer {
                Ok(value) => Ok(value.to_be_bytes::<32>().to_vec()),
                Err(()) => Err(Error::Rpc(RpcError::Unreachable {
                    url: "http://test".into(),
                    message: "connection refused".into(),
                })),
            }
        }

        async fn wait_for_receipt(&self, _tx_hash: TxHash) -> Result<evm_client::TxReceipt> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_totals_decode() {
        let client = PeerClient::new(
            Arc::new(FixedReader { answer: Ok(U256::from(7_000_000u64)) }),
            Address::ZERO,
        );
        let totals = client.totals().await.unwrap();
        assert_eq!(totals.total_value, U256::from(7_000_000u64));
        assert_eq!(totals.total_shares, U256::from(7_000_000u64));
    }

    #[tokio::test]
    async fn test_read_failure_surfaces_as_error_not_zero() {
        let client = PeerClient::new(Arc::new(FixedReader { answer: Err(()) }), Address::ZERO);
        let err = client.total_value().await.unwrap_err();
        assert_eq!(err.error_code(), "rpc_unreachable");
    }
}
