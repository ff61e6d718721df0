//! Workflow phases and their legal transitions.
//!
//! ```text
//! Registration: Started → (UploadingDocuments) → Separating → PublishingMetadata
//!               → RegisteringOnLedger → (StoringPrivateReference) → Completed
//! Transfer:     Started → ReadingOwnership → (UploadingDocuments)
//!               → SubmittingTransfer → Completed
//! ```
//!
//! Any non-terminal phase may move to `Failed`. `Completed` and `Failed` are
//! terminal; nothing resumes or retries.

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Which workflow a phase sequence belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowKind {
    Registration,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowPhase {
    Started,
    UploadingDocuments,
    Separating,
    PublishingMetadata,
    RegisteringOnLedger,
    StoringPrivateReference,
    ReadingOwnership,
    SubmittingTransfer,
    /// Terminal.
    Completed,
    /// Terminal.
    Failed,
}

impl WorkflowPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "Started",
            Self::UploadingDocuments => "UploadingDocuments",
            Self::Separating => "Separating",
            Self::PublishingMetadata => "PublishingMetadata",
            Self::RegisteringOnLedger => "RegisteringOnLedger",
            Self::StoringPrivateReference => "StoringPrivateReference",
            Self::ReadingOwnership => "ReadingOwnership",
            Self::SubmittingTransfer => "SubmittingTransfer",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }

    /// Forward successors within `kind`, excluding `Failed`.
    fn successors(self, kind: WorkflowKind) -> &'static [WorkflowPhase] {
        use WorkflowKind::*;
        use WorkflowPhase::*;
        match (kind, self) {
            (Registration, Started) => &[UploadingDocuments, Separating],
            (Registration, UploadingDocuments) => &[Separating],
            (Registration, Separating) => &[PublishingMetadata],
            (Registration, PublishingMetadata) => &[RegisteringOnLedger],
            (Registration, RegisteringOnLedger) => &[StoringPrivateReference, Completed],
            (Registration, StoringPrivateReference) => &[Completed],
            (Transfer, Started) => &[ReadingOwnership],
            (Transfer, ReadingOwnership) => &[UploadingDocuments, SubmittingTransfer],
            (Transfer, UploadingDocuments) => &[SubmittingTransfer],
            (Transfer, SubmittingTransfer) => &[Completed],
            _ => &[],
        }
    }

    pub fn can_transition_to(self, next: WorkflowPhase, kind: WorkflowKind) -> bool {
        if self.is_terminal() {
            return false;
        }
        next == Self::Failed || self.successors(kind).contains(&next)
    }
}

impl std::fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current phase of one workflow call.
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    kind: WorkflowKind,
    phase: WorkflowPhase,
    history: Vec<WorkflowPhase>,
}

impl PhaseTracker {
    pub fn new(kind: WorkflowKind) -> Self {
        Self {
            kind,
            phase: WorkflowPhase::Started,
            history: vec![WorkflowPhase::Started],
        }
    }

    pub fn kind(&self) -> WorkflowKind {
        self.kind
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    /// Phases visited so far, in order, starting with `Started`.
    pub fn history(&self) -> &[WorkflowPhase] {
        &self.history
    }

    pub fn advance(&mut self, next: WorkflowPhase) -> Result<(), WorkflowError> {
        if !self.phase.can_transition_to(next, self.kind) {
            return Err(WorkflowError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        self.history.push(next);
        Ok(())
    }

    /// Move to `Failed` unless already terminal.
    pub fn fail(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = WorkflowPhase::Failed;
            self.history.push(WorkflowPhase::Failed);
        }
    }
}
