//! Message-id recovery from a send receipt
//!
//! The id is the first indexed topic of the bridge's `MessageSent` event.
//! Extraction matches both the emitting address and the event signature
//! hash; a receipt with no matching log is an explicit error. Matching by
//! log position is not acceptable here: token contracts emit Transfer
//! logs in the same receipt and their order is not stable.

use alloy_primitives::{keccak256, Address, B256};
use evm_client::TxReceipt;
use yieldcoin_core::{Error, MessageId, ProtocolError, Result};

/// Topic0 for an event signature string such as
/// `MessageSent(bytes32,uint64,address,uint256,uint256)`
pub fn event_topic(signature: &str) -> B256 {
    keccak256(signature.as_bytes())
}

/// Find the message id in `receipt`: the log must come from `emitter` and
/// carry `topic0` with at least one indexed parameter.
pub fn extract_message_id(
    receipt: &TxReceipt,
    emitter: Address,
    topic0: B256,
) -> Result<MessageId> {
    receipt
        .logs
        .iter()
        .find(|log| log.address == emitter && log.topics.first() == Some(&topic0))
        .and_then(|log| log.topics.get(1))
        .map(|id| MessageId::new(*id))
        .ok_or_else(|| {
            Error::Protocol(ProtocolError::MessageIdNotFound {
                contract: emitter.to_string(),
                tx_hash: receipt.transaction_hash.to_string(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use evm_client::LogEntry;
    use yieldcoin_core::TxHash;

    const SIG: &str = "MessageSent(bytes32,uint64,address,uint256,uint256)";

    fn bridge() -> Address {
        address!("03d8487343d7e5e8e8bb81039083ef9652b4c2ba")
    }

    fn receipt(logs: Vec<LogEntry>) -> TxReceipt {
        TxReceipt {
            transaction_hash: TxHash::new(B256::repeat_byte(0x11)),
            status: true,
            logs,
        }
    }

    fn log(address: Address, topics: Vec<B256>) -> LogEntry {
        LogEntry {
            address,
            topics,
            data: Default::default(),
        }
    }

    #[test]
    fn test_extracts_from_matching_log() {
        let id = B256::repeat_byte(0x42);
        let r = receipt(vec![
            // a token Transfer from the same tx, later in the log list
            log(bridge(), vec![event_topic(SIG), id]),
            log(address!("1c7d4b196cb0c7b01d743fbc6116a902379c7238"), vec![B256::ZERO, B256::ZERO]),
        ]);
        let got = extract_message_id(&r, bridge(), event_topic(SIG)).unwrap();
        assert_eq!(got, MessageId::new(id));
    }

    #[test]
    fn test_ignores_foreign_emitter_with_same_topic() {
        let id = B256::repeat_byte(0x42);
        let r = receipt(vec![log(
            address!("1c7d4b196cb0c7b01d743fbc6116a902379c7238"),
            vec![event_topic(SIG), id],
        )]);
        let err = extract_message_id(&r, bridge(), event_topic(SIG)).unwrap_err();
        assert_eq!(err.error_code(), "message_id_not_found");
    }

    #[test]
    fn test_no_match_errors_instead_of_guessing_last_log() {
        // last log has a plausible topics[1] but the wrong signature
        let r = receipt(vec![log(
            bridge(),
            vec![B256::repeat_byte(0xaa), B256::repeat_byte(0x42)],
        )]);
        assert!(extract_message_id(&r, bridge(), event_topic(SIG)).is_err());
    }

    #[test]
    fn test_topic_hash_is_stable() {
        assert_eq!(event_topic(SIG), keccak256(SIG.as_bytes()));
        assert_ne!(event_topic(SIG), event_topic("MessageSent(bytes32)"));
    }
}
