use landreg_client::CollaboratorError;
use landreg_core::ParcelId;
use landreg_tier::TierError;

use crate::phase::WorkflowPhase;

/// Why a workflow call stopped.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// A required input field is absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Tier separation failed for a reason other than a missing field.
    #[error(transparent)]
    Separation(TierError),

    /// A collaborator call (upload, publish, register, store, transfer)
    /// failed.
    #[error("{step} failed: {source}")]
    Upload {
        step: WorkflowPhase,
        #[source]
        source: CollaboratorError,
    },

    /// The ownership status read failed. Transfers log this and continue.
    #[error("ownership lookup for {parcel_id} failed: {source}")]
    Lookup {
        parcel_id: ParcelId,
        #[source]
        source: CollaboratorError,
    },

    #[error("invalid workflow transition {from} -> {to}")]
    InvalidTransition { from: WorkflowPhase, to: WorkflowPhase },
}

impl From<TierError> for WorkflowError {
    fn from(err: TierError) -> Self {
        match err {
            TierError::MissingField(field) => Self::MissingField(field),
            other => Self::Separation(other),
        }
    }
}

impl WorkflowError {
    pub(crate) fn upload(step: WorkflowPhase) -> impl FnOnce(CollaboratorError) -> Self {
        move |source| Self::Upload { step, source }
    }
}
