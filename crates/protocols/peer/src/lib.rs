//! Peer vault protocol
//!
//! The vault is a pair of contracts: the ParentPeer on the parent chain
//! (holds the strategy and settles withdrawals) and ChildPeers on the
//! other chains (accept deposits and forward them). Users deposit USDC
//! and hold the 18-decimal share token; withdrawal is a two-step flow on
//! the parent chain.
//!
//! Layout:
//! - `bindings`: the contract ABI surface
//! - `calculator`: pure withdrawal-preview math (no I/O)
//! - `fetch`: vault state reads over a `ChainReader`
//! - `strategy`: active-strategy decode and display mapping

pub mod bindings;
pub mod calculator;
pub mod fetch;
pub mod strategy;

pub use calculator::{preview_withdrawal, WithdrawalPreview, INITIAL_SHARE_PRECISION};
pub use fetch::{PeerClient, VaultTotals};
pub use strategy::{ActiveStrategy, decode_strategy};
