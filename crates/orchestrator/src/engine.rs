//! The transfer engine
//!
//! Every mutating operation is expressed as a `TransferPlan` and run by
//! `Engine::execute`. The engine owns the phase progression, the single
//! app-wide reentrancy guard, active-chain validation at entry and again
//! immediately before each submission, and the no-fallback fee rule.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use evm_client::{ChainReader, TxReceipt};
use tokio::sync::RwLock;
use wallet::{TransactionRequest, WalletConnector};
use yieldcoin_core::{
    ChainId, Error, MessageId, ProtocolError, Result, TxHash, WalletError,
};

use crate::approval::{ensure_approved, ApprovalOutcome};
use crate::status::{OperationStatus, Phase, StatusHandle};

/// One transaction the plan will submit, in order
#[derive(Debug, Clone)]
pub struct SubmitAction {
    pub label: &'static str,
    pub to: Address,
    pub data: Vec<u8>,
    /// Native value attached (router fees travel here)
    pub value: U256,
}

/// Outcome of fee estimation, decided before the engine runs.
/// There is no fallback constant: an unavailable estimate blocks
/// submission unless the caller explicitly acknowledged it.
#[derive(Debug, Clone)]
pub enum FeeDecision {
    NotRequired,
    Quoted(U256),
    Unavailable { reason: String, acknowledged: bool },
}

/// Approval the plan needs before its first action
#[derive(Debug, Clone)]
pub struct ApprovalSpec {
    pub token: Address,
    pub spender: Address,
    pub amount: U256,
}

/// Balance precondition checked before anything is sent
#[derive(Debug, Clone)]
pub struct BalanceRequirement {
    pub token: Address,
    pub required: U256,
}

/// Event to recover a cross-chain message id from the final receipt
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub emitter: Address,
    pub topic0: B256,
}

pub struct TransferPlan {
    pub operation: &'static str,
    pub chain_id: ChainId,
    pub balance: Option<BalanceRequirement>,
    pub fee: FeeDecision,
    pub approval: Option<ApprovalSpec>,
    pub actions: Vec<SubmitAction>,
    pub message_event: Option<MessageEvent>,
    /// Source side finishing is not the end: the operation parks in
    /// `AwaitingDestination` instead of `Completed`
    pub cross_chain: bool,
}

#[derive(Debug, Clone)]
pub struct OperationOutcome {
    pub status_id: String,
    pub tx_hashes: Vec<TxHash>,
    pub message_id: Option<MessageId>,
}

pub struct Engine {
    wallet: Arc<dyn WalletConnector>,
    busy: AtomicBool,
    current: RwLock<Option<StatusHandle>>,
}

impl Engine {
    pub fn new(wallet: Arc<dyn WalletConnector>) -> Self {
        Self {
            wallet,
            busy: AtomicBool::new(false),
            current: RwLock::new(None),
        }
    }

    /// Status of the most recent operation, if any
    pub async fn status(&self) -> Option<OperationStatus> {
        match self.current.read().await.as_ref() {
            Some(handle) => Some(handle.snapshot().await),
            None => None,
        }
    }

    /// Dismiss a displayed error on the current operation
    pub async fn dismiss_error(&self) {
        if let Some(handle) = self.current.read().await.as_ref() {
            handle.dismiss_error().await;
        }
    }

    /// Run a plan to completion. At most one plan runs at a time; a
    /// second call while one is in flight fails fast with `Busy` and
    /// touches nothing.
    pub async fn execute(
        &self,
        reader: Arc<dyn ChainReader>,
        plan: TransferPlan,
    ) -> Result<OperationOutcome> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::Protocol(ProtocolError::Busy));
        }

        let status = StatusHandle::new(plan.operation, plan.chain_id);
        *self.current.write().await = Some(status.clone());

        let result = match self.run(&reader, &plan, &status).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                status.set_error(err.class(), err.to_string()).await;
                Err(err)
            }
        };
        // release only after the outcome landed on the handle; a racing
        // execute must not replace it while the error is still unwritten
        self.busy.store(false, Ordering::SeqCst);
        result
    }

    async fn run(
        &self,
        reader: &Arc<dyn ChainReader>,
        plan: &TransferPlan,
        status: &StatusHandle,
    ) -> Result<OperationOutcome> {
        let owner = self.wallet.address().await?;

        // entry chain check; the wallet may need to switch first
        if self.wallet.active_chain_id().await? != plan.chain_id {
            status.set_phase(Phase::NeedsChainSwitch).await;
            self.wallet.switch_chain(plan.chain_id).await?;
            let active = self.wallet.active_chain_id().await?;
            if active != plan.chain_id {
                return Err(Error::Wallet(WalletError::SwitchRefused {
                    chain_id: plan.chain_id.as_u64(),
                    message: format!("wallet stayed on chain {active}"),
                }));
            }
        }

        // balance precondition; a failed read aborts, it is not zero
        if let Some(req) = &plan.balance {
            let available = reader.balance_of(req.token, owner).await?;
            if available < req.required {
                return Err(Error::Protocol(ProtocolError::InsufficientBalance {
                    required: req.required.to_string(),
                    available: available.to_string(),
                }));
            }
        }

        if let FeeDecision::Unavailable { reason, acknowledged } = &plan.fee {
            if !acknowledged {
                return Err(Error::Protocol(ProtocolError::EstimateFailed {
                    reason: reason.clone(),
                }));
            }
            tracing::warn!(
                operation = plan.operation,
                %reason,
                "proceeding without a fee estimate at caller's request"
            );
        }

        if let Some(spec) = &plan.approval {
            status.set_phase(Phase::NeedsApproval).await;
            let outcome = ensure_approved(
                reader,
                &self.wallet,
                plan.chain_id,
                spec.token,
                owner,
                spec.spender,
                spec.amount,
            )
            .await?;
            if let ApprovalOutcome::Approved { tx_hash, .. } = outcome {
                status.record_tx(tx_hash).await;
            }
        }

        status.set_phase(Phase::ReadyToSubmit).await;

        let mut last_receipt: Option<TxReceipt> = None;
        for action in &plan.actions {
            // the wallet may have been switched away between steps
            let active = self.wallet.active_chain_id().await?;
            if active != plan.chain_id {
                return Err(Error::Wallet(WalletError::SwitchRefused {
                    chain_id: plan.chain_id.as_u64(),
                    message: format!("wallet moved to chain {active} mid-operation"),
                }));
            }

            status.set_phase(Phase::Submitting).await;
            let tx_hash = self
                .wallet
                .send_transaction(TransactionRequest {
                    chain_id: plan.chain_id,
                    from: owner,
                    to: action.to,
                    data: action.data.clone().into(),
                    value: action.value,
                })
                .await?;
            status.record_tx(tx_hash).await;
            tracing::info!(
                operation = plan.operation,
                step = action.label,
                %tx_hash,
                "transaction submitted"
            );
            last_receipt = Some(reader.wait_for_receipt(tx_hash).await?);
        }

        if let Some(event) = &plan.message_event {
            let receipt = last_receipt.as_ref().ok_or_else(|| {
                Error::Protocol(ProtocolError::MessageIdNotFound {
                    contract: event.emitter.to_string(),
                    tx_hash: "no transaction submitted".into(),
                })
            })?;
            let message_id = ccip::extract_message_id(receipt, event.emitter, event.topic0)?;
            status.record_message_id(message_id).await;
        }

        if plan.cross_chain {
            status.set_phase(Phase::AwaitingDestination).await;
        } else {
            status.set_phase(Phase::Completed).await;
        }

        let snapshot = status.snapshot().await;
        Ok(OperationOutcome {
            status_id: snapshot.id,
            tx_hashes: snapshot.tx_hashes,
            message_id: snapshot.message_id,
        })
    }
}
