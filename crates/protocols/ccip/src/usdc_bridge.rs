//! Dedicated USDC bridge contract client
//!
//! The bridge quotes a flat fee (zero address = native coin as the quote
//! basis) and pays CCIP in LINK it holds itself, so the send carries no
//! value. Supported only where the registry lists a `UsdcBridge` address.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use evm_client::{erc20, ChainReader};
use yieldcoin_core::{Error, ProtocolError, Result};

sol! {
    interface IUsdcBridge {
        function getFee(
            uint64 _destinationChainSelector,
            address _receiver,
            uint256 _amount,
            address _feeToken
        ) external view returns (uint256 fee);

        function sendUSDCPayLINK(
            uint64 _destinationChainSelector,
            address _receiver,
            uint256 _amount
        ) external returns (bytes32 messageId);
    }
}

pub struct UsdcBridgeClient {
    reader: Arc<dyn ChainReader>,
    address: Address,
}

impl UsdcBridgeClient {
    pub fn new(reader: Arc<dyn ChainReader>, address: Address) -> Self {
        Self { reader, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Flat fee quote; no fallback on failure
    pub async fn quote_fee(
        &self,
        dest_selector: u64,
        receiver: Address,
        amount: U256,
    ) -> Result<U256> {
        let call = IUsdcBridge::getFeeCall {
            _destinationChainSelector: dest_selector,
            _receiver: receiver,
            _amount: amount,
            _feeToken: Address::ZERO,
        };
        let raw = self
            .reader
            .call(self.address, call.abi_encode())
            .await
            .map_err(|e| {
                Error::Protocol(ProtocolError::EstimateFailed {
                    reason: e.to_string(),
                })
            })?;
        erc20::decode_u256(&raw)
    }

    /// Calldata for the send; no value attached (bridge pays LINK)
    pub fn send_call(&self, dest_selector: u64, receiver: Address, amount: U256) -> Vec<u8> {
        IUsdcBridge::sendUSDCPayLINKCall {
            _destinationChainSelector: dest_selector,
            _receiver: receiver,
            _amount: amount,
        }
        .abi_encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use async_trait::async_trait;
    use yieldcoin_core::{ChainId, TxHash};

    struct QuoteReader(U256);

    #[async_trait]
    impl ChainReader for QuoteReader {
        fn chain_id(&self) -> ChainId {
            ChainId::new(11155111)
        }

        async fn balance_of(&self, _: Address, _: Address) -> Result<U256> {
            unimplemented!()
        }

        async fn allowance(&self, _: Address, _: Address, _: Address) -> Result<U256> {
            unimplemented!()
        }

        async fn call(&self, _: Address, data: Vec<u8>) -> Result<Vec<u8>> {
            // only getFee reads come through here
            assert_eq!(&data[..4], IUsdcBridge::getFeeCall::SELECTOR);
            Ok(self.0.to_be_bytes::<32>().to_vec())
        }

        async fn wait_for_receipt(&self, _: TxHash) -> Result<evm_client::TxReceipt> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_quote_decodes_fee() {
        let bridge = UsdcBridgeClient::new(
            Arc::new(QuoteReader(U256::from(12_345u64))),
            address!("03d8487343d7e5e8e8bb81039083ef9652b4c2ba"),
        );
        let fee = bridge
            .quote_fee(14767482510784806043, Address::ZERO, U256::from(1))
            .await
            .unwrap();
        assert_eq!(fee, U256::from(12_345u64));
    }

    #[test]
    fn test_send_call_encodes_three_args() {
        let bridge = UsdcBridgeClient::new(
            Arc::new(QuoteReader(U256::ZERO)),
            Address::ZERO,
        );
        let data = bridge.send_call(14767482510784806043, Address::ZERO, U256::from(1));
        assert_eq!(data.len(), 4 + 3 * 32);
    }
}
