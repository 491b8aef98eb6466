//! Chain registry: supported networks, deployed contract addresses, and
//! CCIP selectors.
//!
//! This is the single source of truth for routing decisions. Every lookup
//! returns `Option`; a missing address or selector means the operation is
//! unsupported on that chain and callers must refuse, never substitute a
//! default.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::types::ChainId;

/// Ethereum Sepolia testnet
pub const ETH_SEPOLIA: ChainId = ChainId::new(11155111);
/// Base Sepolia testnet
pub const BASE_SEPOLIA: ChainId = ChainId::new(84532);
/// Avalanche Fuji testnet (parent chain, hosts the ParentPeer)
pub const AVALANCHE_FUJI: ChainId = ChainId::new(43113);

/// Deployed contract roles a chain may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractRole {
    /// USDC stablecoin (6 decimals)
    Usdc,
    /// LINK token (18 decimals)
    Link,
    /// YieldCoin share token (18 decimals)
    YieldToken,
    /// Vault peer: ParentPeer on the parent chain, ChildPeer elsewhere
    Peer,
    /// Chainlink CCIP router
    CcipRouter,
    /// Dedicated USDC bridge contract
    UsdcBridge,
}

/// A supported network and its deployment
#[derive(Debug, Clone, Serialize)]
pub struct Chain {
    pub id: ChainId,
    pub name: &'static str,
    pub short_name: &'static str,
    pub rpc_url: &'static str,
    pub block_explorer: &'static str,
    /// The parent chain hosts the ParentPeer and settles withdrawals
    pub is_parent: bool,
    /// CCIP chain selector
    pub selector: u64,
    pub usdc: Option<Address>,
    pub link: Option<Address>,
    pub yield_token: Option<Address>,
    pub peer: Option<Address>,
    pub ccip_router: Option<Address>,
    pub usdc_bridge: Option<Address>,
}

impl Chain {
    pub fn contract(&self, role: ContractRole) -> Option<Address> {
        match role {
            ContractRole::Usdc => self.usdc,
            ContractRole::Link => self.link,
            ContractRole::YieldToken => self.yield_token,
            ContractRole::Peer => self.peer,
            ContractRole::CcipRouter => self.ccip_router,
            ContractRole::UsdcBridge => self.usdc_bridge,
        }
    }
}

/// Current deployment generation. Older generations are retired wholesale;
/// there is no mixed-generation routing.
pub const SUPPORTED_CHAINS: &[Chain] = &[
    Chain {
        id: ETH_SEPOLIA,
        name: "Ethereum Sepolia",
        short_name: "Ethereum",
        rpc_url: "https://ethereum-sepolia-rpc.publicnode.com",
        block_explorer: "https://sepolia.etherscan.io",
        is_parent: false,
        selector: 16015286601757825753,
        usdc: Some(address!("1c7d4b196cb0c7b01d743fbc6116a902379c7238")),
        link: Some(address!("779877a7b0d9e8603169ddbd7836e478b4624789")),
        yield_token: Some(address!("5c5f07fd137aa38860b5fa2ca5671bd5c49333b4")),
        peer: Some(address!("69bf065eae8fba65ddf51c55e069ae93cd5b9806")),
        ccip_router: Some(address!("0bf3de8c5d3e8a2b34d2beeb17abfcebaf363a59")),
        usdc_bridge: Some(address!("03d8487343d7e5e8e8bb81039083ef9652b4c2ba")),
    },
    Chain {
        id: BASE_SEPOLIA,
        name: "Base Sepolia",
        short_name: "Base",
        rpc_url: "https://sepolia.base.org",
        block_explorer: "https://sepolia.basescan.org",
        is_parent: false,
        selector: 10344971235874465080,
        usdc: Some(address!("036cbd53842c5426634e7929541ec2318f3dcf7e")),
        link: None,
        yield_token: Some(address!("771ceed62ac79cba5ec557b8095b8cdc13559dd3")),
        peer: None,
        ccip_router: Some(address!("d3b06cebf099ce7da4accf578aaebfdbd6e88a93")),
        usdc_bridge: None,
    },
    Chain {
        id: AVALANCHE_FUJI,
        name: "Avalanche Fuji",
        short_name: "Avalanche",
        rpc_url: "https://api.avax-test.network/ext/bc/C/rpc",
        block_explorer: "https://testnet.snowtrace.io",
        is_parent: true,
        selector: 14767482510784806043,
        usdc: Some(address!("5425890298aed601595a70ab815c96711a31bc65")),
        link: Some(address!("0b9d5d9136855f6fec3c0993fee6e9ce8a297846")),
        yield_token: Some(address!("550a6bef9fa59639cd73126d7d066948280f9fb9")),
        peer: Some(address!("6fc54920ab230872c3cba638039def4920284c9f")),
        ccip_router: Some(address!("f694e193200268f9a4868e4aa017a0118c9a8177")),
        usdc_bridge: Some(address!("03d8487343d7e5e8e8bb81039083ef9652b4c2ba")),
    },
];

/// Token decimals
pub mod decimals {
    pub const USDC: u8 = 6;
    pub const YIELD_TOKEN: u8 = 18;
    pub const LINK: u8 = 18;
}

/// Look up a chain by its network id
pub fn resolve_chain(id: ChainId) -> Option<&'static Chain> {
    SUPPORTED_CHAINS.iter().find(|c| c.id == id)
}

/// Look up a deployed contract address; `None` means unsupported there
pub fn resolve_contract(role: ContractRole, id: ChainId) -> Option<Address> {
    resolve_chain(id).and_then(|c| c.contract(role))
}

/// Look up the CCIP selector for a chain
pub fn resolve_selector(id: ChainId) -> Option<u64> {
    resolve_chain(id).map(|c| c.selector)
}

/// Map a CCIP selector back to the registry chain it identifies
pub fn chain_for_selector(selector: u64) -> Option<&'static Chain> {
    SUPPORTED_CHAINS.iter().find(|c| c.selector == selector)
}

/// The parent chain (exactly one per deployment generation); `None` would
/// mean a registry without a ParentPeer host, which callers must refuse
pub fn parent_chain() -> Option<&'static Chain> {
    SUPPORTED_CHAINS.iter().find(|c| c.is_parent)
}

/// Human name for a vault strategy protocol id
pub fn protocol_name(protocol_id: u8) -> Option<&'static str> {
    match protocol_id {
        0 => Some("Aave"),
        1 => Some("Compound"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_chain_known_and_unknown() {
        assert_eq!(resolve_chain(ETH_SEPOLIA).map(|c| c.name), Some("Ethereum Sepolia"));
        assert!(resolve_chain(ChainId::new(1)).is_none());
    }

    #[test]
    fn test_exactly_one_parent() {
        let parents = SUPPORTED_CHAINS.iter().filter(|c| c.is_parent).count();
        assert_eq!(parents, 1);
        assert_eq!(parent_chain().map(|c| c.id), Some(AVALANCHE_FUJI));
    }

    #[test]
    fn test_peer_absent_on_base() {
        assert!(resolve_contract(ContractRole::Peer, BASE_SEPOLIA).is_none());
        assert!(resolve_contract(ContractRole::Peer, ETH_SEPOLIA).is_some());
        assert!(resolve_contract(ContractRole::Peer, AVALANCHE_FUJI).is_some());
    }

    #[test]
    fn test_usdc_bridge_coverage() {
        assert!(resolve_contract(ContractRole::UsdcBridge, ETH_SEPOLIA).is_some());
        assert!(resolve_contract(ContractRole::UsdcBridge, AVALANCHE_FUJI).is_some());
        assert!(resolve_contract(ContractRole::UsdcBridge, BASE_SEPOLIA).is_none());
    }

    #[test]
    fn test_selector_round_trip() {
        for chain in SUPPORTED_CHAINS {
            let sel = resolve_selector(chain.id).unwrap();
            assert_eq!(chain_for_selector(sel).unwrap().id, chain.id);
        }
        assert!(chain_for_selector(1).is_none());
    }

    #[test]
    fn test_protocol_names() {
        assert_eq!(protocol_name(0), Some("Aave"));
        assert_eq!(protocol_name(1), Some("Compound"));
        assert_eq!(protocol_name(7), None);
    }
}
