//! CCIP router path: fee quote and token send for the share token

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall, SolValue};
use evm_client::{erc20, ChainReader};
use yieldcoin_core::{Error, ProtocolError, Result};

sol! {
    struct EVMTokenAmount {
        address token;
        uint256 amount;
    }

    struct EVM2AnyMessage {
        bytes receiver;
        bytes data;
        EVMTokenAmount[] tokenAmounts;
        address feeToken;
        bytes extraArgs;
    }

    interface IRouterClient {
        function getFee(uint64 destinationChainSelector, EVM2AnyMessage message)
            external view returns (uint256 fee);

        function ccipSend(uint64 destinationChainSelector, EVM2AnyMessage message)
            external payable returns (bytes32);
    }
}

/// Build the token-transfer message: one token amount, no payload, fee in
/// native coin (zero feeToken), default extraArgs.
fn transfer_message(receiver: Address, token: Address, amount: U256) -> EVM2AnyMessage {
    EVM2AnyMessage {
        receiver: receiver.abi_encode().into(),
        data: Default::default(),
        tokenAmounts: vec![EVMTokenAmount { token, amount }],
        feeToken: Address::ZERO,
        extraArgs: Default::default(),
    }
}

/// One deployed router, read through a `ChainReader`
pub struct RouterClient {
    reader: Arc<dyn ChainReader>,
    address: Address,
}

impl RouterClient {
    pub fn new(reader: Arc<dyn ChainReader>, address: Address) -> Self {
        Self { reader, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Quote the native-coin fee for a token transfer. A failed quote is
    /// an `EstimateFailed`; there is no fallback constant.
    pub async fn quote_fee(
        &self,
        dest_selector: u64,
        receiver: Address,
        token: Address,
        amount: U256,
    ) -> Result<U256> {
        let call = IRouterClient::getFeeCall {
            destinationChainSelector: dest_selector,
            message: transfer_message(receiver, token, amount),
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

    /// Calldata for the send; the quoted fee travels as the tx value
    pub fn send_call(
        &self,
        dest_selector: u64,
        receiver: Address,
        token: Address,
        amount: U256,
    ) -> Vec<u8> {
        IRouterClient::ccipSendCall {
            destinationChainSelector: dest_selector,
            message: transfer_message(receiver, token, amount),
        }
        .abi_encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use async_trait::async_trait;
    use yieldcoin_core::{ChainId, RpcError, TxHash};

    struct FailingReader;

    #[async_trait]
    impl ChainReader for FailingReader {
        fn chain_id(&self) -> ChainId {
            ChainId::new(43113)
        }

        async fn balance_of(&self, _: Address, _: Address) -> Result<U256> {
            unimplemented!()
        }

        async fn allowance(&self, _: Address, _: Address, _: Address) -> Result<U256> {
            unimplemented!()
        }

        async fn call(&self, _: Address, _: Vec<u8>) -> Result<Vec<u8>> {
            Err(Error::Rpc(RpcError::Timeout(15)))
        }

        async fn wait_for_receipt(&self, _: TxHash) -> Result<evm_client::TxReceipt> {
            unimplemented!()
        }
    }

    #[test]
    fn test_message_shape() {
        let receiver = address!("69bf065eae8fba65ddf51c55e069ae93cd5b9806");
        let token = address!("550a6bef9fa59639cd73126d7d066948280f9fb9");
        let message = transfer_message(receiver, token, U256::from(100));
        // receiver is the abi-encoded address, one 32-byte word
        assert_eq!(message.receiver.len(), 32);
        assert!(message.data.is_empty());
        assert!(message.extraArgs.is_empty());
        assert_eq!(message.feeToken, Address::ZERO);
        assert_eq!(message.tokenAmounts.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_quote_is_estimate_failed_not_fallback() {
        let router = RouterClient::new(Arc::new(FailingReader), Address::ZERO);
        let err = router
            .quote_fee(16015286601757825753, Address::ZERO, Address::ZERO, U256::from(1))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "estimate_failed");
    }
}
