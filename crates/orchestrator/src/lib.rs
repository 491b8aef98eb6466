//! orchestrator: the one state machine every mutating operation runs on
//!
//! Deposits, withdrawals, and both bridge paths differ only in their plan
//! (which approval, which fee, which calldata); the phase progression,
//! chain re-validation, reentrancy guard, and error handling are shared
//! here so no operation grows its own ad hoc flags.

pub mod approval;
pub mod engine;
pub mod status;

pub use approval::{ensure_approved, ApprovalOutcome};
pub use engine::{
    ApprovalSpec, BalanceRequirement, Engine, FeeDecision, MessageEvent, OperationOutcome,
    SubmitAction, TransferPlan,
};
pub use status::{OperationStatus, Phase, StatusHandle};
