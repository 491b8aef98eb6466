//! Receipt and log types decoded from JSON-RPC responses

use alloy_primitives::{Address, Bytes, B256};
use serde_json::Value;
use yieldcoin_core::{Error, Result, RpcError, TxHash};

/// A single receipt log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

/// A mined transaction receipt
#[derive(Debug, Clone)]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    /// true = success, false = reverted
    pub status: bool,
    pub logs: Vec<LogEntry>,
}

pub(crate) fn parse_receipt(value: &Value) -> Result<TxReceipt> {
    let tx_hash: B256 = field_str(value, "transactionHash")?
        .parse()
        .map_err(|e| parse_err(format!("transactionHash: {e}")))?;
    let status = match field_str(value, "status")? {
        "0x1" => true,
        "0x0" => false,
        other => return Err(parse_err(format!("unexpected receipt status {other}"))),
    };

    let raw_logs = value
        .get("logs")
        .and_then(Value::as_array)
        .ok_or_else(|| parse_err("receipt missing logs".into()))?;
    let mut logs = Vec::with_capacity(raw_logs.len());
    for raw in raw_logs {
        let address: Address = field_str(raw, "address")?
            .parse()
            .map_err(|e| parse_err(format!("log address: {e}")))?;
        let mut topics = Vec::new();
        for topic in raw.get("topics").and_then(Value::as_array).into_iter().flatten() {
            let t: B256 = topic
                .as_str()
                .ok_or_else(|| parse_err("log topic not a string".into()))?
                .parse()
                .map_err(|e| parse_err(format!("log topic: {e}")))?;
            topics.push(t);
        }
        let data: Bytes = field_str(raw, "data")?
            .parse()
            .map_err(|e| parse_err(format!("log data: {e}")))?;
        logs.push(LogEntry { address, topics, data });
    }

    Ok(TxReceipt {
        transaction_hash: TxHash::new(tx_hash),
        status,
        logs,
    })
}

fn field_str<'a>(value: &'a Value, key: &str) -> Result<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| parse_err(format!("receipt missing {key}")))
}

fn parse_err(message: String) -> Error {
    Error::Rpc(RpcError::ParseError(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_receipt_with_log() {
        let raw = json!({
            "transactionHash": "0x1111111111111111111111111111111111111111111111111111111111111111",
            "status": "0x1",
            "logs": [{
                "address": "0x03d8487343d7e5e8e8bb81039083ef9652b4c2ba",
                "topics": [
                    "0x2222222222222222222222222222222222222222222222222222222222222222",
                    "0x3333333333333333333333333333333333333333333333333333333333333333"
                ],
                "data": "0x"
            }]
        });
        let receipt = parse_receipt(&raw).unwrap();
        assert!(receipt.status);
        assert_eq!(receipt.logs.len(), 1);
        assert_eq!(receipt.logs[0].topics.len(), 2);
    }

    #[test]
    fn test_parse_reverted_receipt() {
        let raw = json!({
            "transactionHash": "0x1111111111111111111111111111111111111111111111111111111111111111",
            "status": "0x0",
            "logs": []
        });
        let receipt = parse_receipt(&raw).unwrap();
        assert!(!receipt.status);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_receipt(&json!({"status": "0x1"})).is_err());
    }
}
