//! Idempotent ERC-20 approval step
//!
//! Approves exactly the requested amount, skips the transaction entirely
//! when the standing allowance already covers it, and re-reads the
//! allowance after confirmation before reporting success.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use evm_client::{erc20, ChainReader};
use wallet::{TransactionRequest, WalletConnector};
use yieldcoin_core::{ChainId, Error, ProtocolError, Result, TxHash, WalletError};

/// What the approval step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// Standing allowance already covers the amount; nothing sent
    AlreadySufficient { allowance: U256 },
    /// Approval transaction confirmed and the new allowance verified
    Approved { tx_hash: TxHash, allowance: U256 },
}

pub async fn ensure_approved(
    reader: &Arc<dyn ChainReader>,
    wallet: &Arc<dyn WalletConnector>,
    chain_id: ChainId,
    token: Address,
    owner: Address,
    spender: Address,
    amount: U256,
) -> Result<ApprovalOutcome> {
    let current = reader.allowance(token, owner, spender).await?;
    if current >= amount {
        tracing::debug!(%token, %spender, %current, "allowance already sufficient");
        return Ok(ApprovalOutcome::AlreadySufficient { allowance: current });
    }

    // the allowance read is async; the wallet may have moved in the meantime
    let active = wallet.active_chain_id().await?;
    if active != chain_id {
        return Err(Error::Wallet(WalletError::SwitchRefused {
            chain_id: chain_id.as_u64(),
            message: format!("wallet moved to chain {active} mid-operation"),
        }));
    }

    let tx_hash = wallet
        .send_transaction(TransactionRequest {
            chain_id,
            from: owner,
            to: token,
            data: erc20::approve_call(spender, amount).into(),
            value: U256::ZERO,
        })
        .await?;
    tracing::info!(%token, %spender, %amount, %tx_hash, "approval submitted");
    reader.wait_for_receipt(tx_hash).await?;

    // trust the chain, not the receipt
    let allowance = reader.allowance(token, owner, spender).await?;
    if allowance < amount {
        return Err(Error::Protocol(ProtocolError::ApprovalNotEffective {
            required: amount.to_string(),
        }));
    }
    Ok(ApprovalOutcome::Approved { tx_hash, allowance })
}
