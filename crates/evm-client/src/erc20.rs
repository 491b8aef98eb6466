//! ERC-20 calldata encode/decode via `sol!` bindings

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall, SolValue};
use yieldcoin_core::{Error, ProtocolError, Result};

sol! {
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

pub fn balance_of_call(account: Address) -> Vec<u8> {
    IERC20::balanceOfCall { account }.abi_encode()
}

pub fn allowance_call(owner: Address, spender: Address) -> Vec<u8> {
    IERC20::allowanceCall { owner, spender }.abi_encode()
}

pub fn approve_call(spender: Address, amount: U256) -> Vec<u8> {
    IERC20::approveCall { spender, amount }.abi_encode()
}

pub fn transfer_call(to: Address, amount: U256) -> Vec<u8> {
    IERC20::transferCall { to, amount }.abi_encode()
}

/// Decode a single uint256 return value
pub fn decode_u256(raw: &[u8]) -> Result<U256> {
    U256::abi_decode(raw, true).map_err(|e| {
        Error::Protocol(ProtocolError::DecodeError {
            message: format!("uint256 return: {e}"),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_selectors_match_abi() {
        let owner = address!("69bf065eae8fba65ddf51c55e069ae93cd5b9806");
        let spender = address!("f694e193200268f9a4868e4aa017a0118c9a8177");
        assert_eq!(&balance_of_call(owner)[..4], [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(&allowance_call(owner, spender)[..4], [0xdd, 0x62, 0xed, 0x3e]);
        assert_eq!(&approve_call(spender, U256::from(1))[..4], [0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(&transfer_call(owner, U256::from(1))[..4], [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_decode_u256() {
        let mut raw = [0u8; 32];
        raw[31] = 0x2a;
        assert_eq!(decode_u256(&raw).unwrap(), U256::from(42));
        assert!(decode_u256(&raw[..31]).is_err());
    }
}
