//! yieldcoin-core: shared types, errors, configuration, and the chain registry
//!
//! Everything here is pure data and pure functions: no I/O, no async.
//! The registry is the single source of truth for supported chains and
//! deployed contract addresses; absence of an address means the operation
//! is unsupported on that chain, never a silent default.

pub mod chains;
pub mod config;
pub mod errors;
pub mod types;
pub mod units;

pub use chains::{Chain, ContractRole};
pub use config::AppConfig;
pub use errors::{Error, ErrorClass, ProtocolError, Result, RpcError, WalletError};
pub use types::{ChainId, MessageId, TxHash};

// Re-exported so downstream crates agree on one set of EVM primitives.
pub use alloy_primitives::{Address, B256, U256};
