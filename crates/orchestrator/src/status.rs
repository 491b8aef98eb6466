//! Operation status: one progression, updated exactly once per transition

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use yieldcoin_core::{ChainId, ErrorClass, MessageId, TxHash};

/// Phase of an in-flight operation. Forward progression only;
/// `Errored` can interrupt any phase and is dismissed back to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    NeedsChainSwitch,
    NeedsApproval,
    ReadyToSubmit,
    Submitting,
    /// Source side done; the message is on its way
    AwaitingDestination,
    Completed,
    Errored {
        /// Phase the error interrupted; dismissing returns here
        retained: Box<Phase>,
        class: ErrorClass,
        message: String,
    },
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::NeedsChainSwitch => "needs_chain_switch",
            Phase::NeedsApproval => "needs_approval",
            Phase::ReadyToSubmit => "ready_to_submit",
            Phase::Submitting => "submitting",
            Phase::AwaitingDestination => "awaiting_destination",
            Phase::Completed => "completed",
            Phase::Errored { .. } => "errored",
        }
    }
}

/// Observable state of one operation
#[derive(Debug, Clone, Serialize)]
pub struct OperationStatus {
    pub id: String,
    pub operation: &'static str,
    pub chain_id: ChainId,
    #[serde(flatten)]
    pub phase: Phase,
    pub tx_hashes: Vec<TxHash>,
    pub message_id: Option<MessageId>,
}

impl OperationStatus {
    pub fn new(operation: &'static str, chain_id: ChainId) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            operation,
            chain_id,
            phase: Phase::Idle,
            tx_hashes: Vec::new(),
            message_id: None,
        }
    }
}

/// Shared handle the engine writes and the API reads
#[derive(Clone)]
pub struct StatusHandle {
    inner: Arc<RwLock<OperationStatus>>,
}

impl StatusHandle {
    pub fn new(operation: &'static str, chain_id: ChainId) -> Self {
        Self {
            inner: Arc::new(RwLock::new(OperationStatus::new(operation, chain_id))),
        }
    }

    pub async fn snapshot(&self) -> OperationStatus {
        self.inner.read().await.clone()
    }

    /// One transition, one update, one log line
    pub async fn set_phase(&self, phase: Phase) {
        let mut status = self.inner.write().await;
        if status.phase == phase {
            return;
        }
        tracing::info!(
            operation = status.operation,
            id = %status.id,
            from = status.phase.name(),
            to = phase.name(),
            "operation transition"
        );
        status.phase = phase;
    }

    pub async fn record_tx(&self, tx_hash: TxHash) {
        self.inner.write().await.tx_hashes.push(tx_hash);
    }

    pub async fn record_message_id(&self, message_id: MessageId) {
        self.inner.write().await.message_id = Some(message_id);
    }

    /// Interrupt the current phase with an error, retaining it
    pub async fn set_error(&self, class: ErrorClass, message: String) {
        let retained = {
            let status = self.inner.read().await;
            match &status.phase {
                // an error over an error keeps the original retained phase
                Phase::Errored { retained, .. } => retained.clone(),
                other => Box::new(other.clone()),
            }
        };
        self.set_phase(Phase::Errored {
            retained,
            class,
            message,
        })
        .await;
    }

    /// Dismiss a displayed error, returning to the phase it interrupted.
    /// No-op when not errored.
    pub async fn dismiss_error(&self) {
        let retained = {
            let status = self.inner.read().await;
            match &status.phase {
                Phase::Errored { retained, .. } => Some((**retained).clone()),
                _ => None,
            }
        };
        if let Some(phase) = retained {
            self.set_phase(phase).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_retains_and_dismisses() {
        let handle = StatusHandle::new("deposit", ChainId::new(43113));
        handle.set_phase(Phase::Submitting).await;
        handle
            .set_error(ErrorClass::Network, "rpc timeout".into())
            .await;

        let status = handle.snapshot().await;
        match &status.phase {
            Phase::Errored { retained, class, .. } => {
                assert_eq!(**retained, Phase::Submitting);
                assert_eq!(*class, ErrorClass::Network);
            }
            other => panic!("expected errored, got {other:?}"),
        }

        handle.dismiss_error().await;
        assert_eq!(handle.snapshot().await.phase, Phase::Submitting);
    }

    #[tokio::test]
    async fn test_dismiss_without_error_is_noop() {
        let handle = StatusHandle::new("deposit", ChainId::new(43113));
        handle.set_phase(Phase::NeedsApproval).await;
        handle.dismiss_error().await;
        assert_eq!(handle.snapshot().await.phase, Phase::NeedsApproval);
    }

    #[tokio::test]
    async fn test_double_error_keeps_first_retained_phase() {
        let handle = StatusHandle::new("bridge", ChainId::new(11155111));
        handle.set_phase(Phase::ReadyToSubmit).await;
        handle.set_error(ErrorClass::Network, "first".into()).await;
        handle.set_error(ErrorClass::Unknown, "second".into()).await;
        handle.dismiss_error().await;
        assert_eq!(handle.snapshot().await.phase, Phase::ReadyToSubmit);
    }
}
