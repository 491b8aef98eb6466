//! CCIP transport layer
//!
//! Two send paths share this crate: the general router path (used for the
//! share token, fee paid in native coin) and the dedicated USDC bridge
//! contract (fee quoted flat, paid in LINK held by the bridge). Both
//! produce a cross-chain message id; the bridge's is recovered from the
//! receipt by named-event decode, never by log position.

pub mod message_id;
pub mod router;
pub mod status;
pub mod usdc_bridge;

pub use message_id::extract_message_id;
pub use router::RouterClient;
pub use status::{MessageStatus, StatusClient};
pub use usdc_bridge::UsdcBridgeClient;
