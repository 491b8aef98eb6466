//! Core type definitions for the YieldCoin client

use std::fmt;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// EVM network identifier (the chain's native id, not its CCIP selector)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction hash (32 bytes, 0x-prefixed hex)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub B256);

impl TxHash {
    pub fn new(hash: B256) -> Self {
        Self(hash)
    }

    pub fn as_b256(&self) -> &B256 {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// CCIP cross-chain message identifier (32 bytes, 0x-prefixed hex)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub B256);

impl MessageId {
    pub fn new(id: B256) -> Self {
        Self(id)
    }

    pub fn as_b256(&self) -> &B256 {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_hash_display_is_prefixed_hex() {
        let hash = TxHash::new(B256::repeat_byte(0xab));
        let s = hash.to_string();
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 66);
    }

    #[test]
    fn test_chain_id_serde_transparent() {
        let id = ChainId::new(43113);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "43113");
        let parsed: ChainId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
