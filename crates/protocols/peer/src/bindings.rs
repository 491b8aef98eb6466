//! Peer contract ABI surface

use alloy_primitives::U256;
use alloy_sol_types::{sol, SolCall};

sol! {
    interface IPeer {
        /// Deposit USDC into the vault (amount in 6-decimal base units).
        /// Caller must have approved the peer first.
        function deposit(uint256 amount) external;

        /// Burn previously-transferred shares and release USDC.
        /// ParentPeer only.
        function withdraw(uint256 shareAmount) external;

        function getTotalValue() external view returns (uint256);

        function getTotalShares() external view returns (uint256);

        /// Active strategy: target chain (CCIP selector, widened) and
        /// lending protocol id
        function getStrategy() external view returns (bytes32 chainSelector, uint8 protocolId);
    }
}

pub fn deposit_call(amount: U256) -> Vec<u8> {
    IPeer::depositCall { amount }.abi_encode()
}

pub fn withdraw_call(share_amount: U256) -> Vec<u8> {
    IPeer::withdrawCall { shareAmount: share_amount }.abi_encode()
}

pub fn total_value_call() -> Vec<u8> {
    IPeer::getTotalValueCall {}.abi_encode()
}

pub fn total_shares_call() -> Vec<u8> {
    IPeer::getTotalSharesCall {}.abi_encode()
}

pub fn strategy_call() -> Vec<u8> {
    IPeer::getStrategyCall {}.abi_encode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdraw_selector() {
        // withdraw(uint256)
        assert_eq!(&withdraw_call(U256::from(1))[..4], [0x2e, 0x1a, 0x7d, 0x4d]);
    }

    #[test]
    fn test_calls_are_selector_plus_args() {
        assert_eq!(deposit_call(U256::from(1)).len(), 4 + 32);
        assert_eq!(total_value_call().len(), 4);
        assert_eq!(total_shares_call().len(), 4);
        assert_eq!(strategy_call().len(), 4);
    }
}
