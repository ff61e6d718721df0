//! # landreg-workflow
//!
//! Registration and transfer orchestration. [`WorkflowOrchestrator`] binds a
//! caller's claims to a [`landreg_client::Collaborators`] set and records
//! each step in its own [`StepLog`].

pub mod error;
pub mod orchestrator;
pub mod phase;
pub mod result;
pub mod steps;

pub use error::WorkflowError;
pub use orchestrator::WorkflowOrchestrator;
pub use phase::{PhaseTracker, WorkflowKind, WorkflowPhase};
pub use result::{RegistrationReceipt, RegistrationResult, TransferReceipt, TransferResult, WorkflowResult};
pub use steps::{StepEntry, StepKind, StepLog};
