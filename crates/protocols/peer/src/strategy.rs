//! Active-strategy decode and display mapping
//!
//! `getStrategy()` returns the target chain as a CCIP selector widened to
//! bytes32 plus a protocol id. Display mapping goes through the registry;
//! an unknown selector or protocol id is shown as unknown, not guessed.

use alloy_primitives::U256;
use alloy_sol_types::{sol_data, SolType};
use serde::Serialize;
use yieldcoin_core::{chains, Error, ProtocolError, Result};

/// Decoded `getStrategy()` answer
#[derive(Debug, Clone, Serialize)]
pub struct ActiveStrategy {
    /// CCIP selector of the chain funds are deployed on
    pub chain_selector: u64,
    pub protocol_id: u8,
    /// Registry chain name, if the selector is known
    pub chain_name: Option<&'static str>,
    /// Lending protocol name, if the id is known
    pub protocol: Option<&'static str>,
}

pub fn decode_strategy(raw: &[u8]) -> Result<ActiveStrategy> {
    let (selector_word, protocol_id) =
        <(sol_data::FixedBytes<32>, sol_data::Uint<8>)>::abi_decode(raw, true).map_err(|e| {
            Error::Protocol(ProtocolError::DecodeError {
                message: format!("getStrategy return: {e}"),
            })
        })?;

    let selector_value = U256::from_be_bytes(selector_word.0);
    let chain_selector = u64::try_from(selector_value).map_err(|_| {
        Error::Protocol(ProtocolError::DecodeError {
            message: format!("chain selector {selector_value} exceeds u64"),
        })
    })?;

    Ok(ActiveStrategy {
        chain_selector,
        protocol_id,
        chain_name: chains::chain_for_selector(chain_selector).map(|c| c.name),
        protocol: chains::protocol_name(protocol_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;

    fn encode(selector: u64, protocol_id: u8) -> Vec<u8> {
        let word = B256::from(U256::from(selector));
        <(sol_data::FixedBytes<32>, sol_data::Uint<8>)>::abi_encode(&(word, protocol_id))
    }

    #[test]
    fn test_decode_known_strategy() {
        let raw = encode(14767482510784806043, 0);
        let strategy = decode_strategy(&raw).unwrap();
        assert_eq!(strategy.chain_name, Some("Avalanche Fuji"));
        assert_eq!(strategy.protocol, Some("Aave"));
    }

    #[test]
    fn test_unknown_selector_and_protocol_stay_unknown() {
        let raw = encode(42, 9);
        let strategy = decode_strategy(&raw).unwrap();
        assert_eq!(strategy.chain_selector, 42);
        assert!(strategy.chain_name.is_none());
        assert!(strategy.protocol.is_none());
    }

    #[test]
    fn test_short_data_is_an_error() {
        assert!(decode_strategy(&[0u8; 16]).is_err());
    }
}
