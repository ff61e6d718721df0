//! Caller-visible workflow results.
//!
//! A result always carries `success` and the step entries appended during
//! the call. On success it carries the receipt; on failure, the error.
//! Serialized, the receipt fields sit at the top level next to `success`:
//!
//! ```json
//! {"success": true, "parcelId": "...", "contentId": "...", "steps": [...]}
//! {"success": false, "error": "PublishingMetadata failed: ...", "steps": [...]}
//! ```

use std::collections::BTreeMap;

use landreg_core::ParcelId;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::WorkflowError;
use crate::steps::StepEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    /// Identifier as returned by the ledger.
    pub parcel_id: ParcelId,
    pub content_id: String,
    pub ledger_tx_ref: String,
    pub private_data_stored: bool,
    /// Role the caller asserted, as they stated it.
    pub access_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_reference_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    pub parcel_id: ParcelId,
    pub new_owner: String,
    pub ledger_tx_ref: String,
    /// Document type to stored URL for the uploaded transfer documents.
    pub transfer_documents: BTreeMap<String, String>,
    /// Owner reported by the ledger before the transfer, if the read worked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_owner: Option<String>,
}

#[derive(Debug)]
pub struct WorkflowResult<R> {
    outcome: Result<R, WorkflowError>,
    steps: Vec<StepEntry>,
}

pub type RegistrationResult = WorkflowResult<RegistrationReceipt>;
pub type TransferResult = WorkflowResult<TransferReceipt>;

impl<R> WorkflowResult<R> {
    pub(crate) fn new(outcome: Result<R, WorkflowError>, steps: Vec<StepEntry>) -> Self {
        Self { outcome, steps }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn receipt(&self) -> Option<&R> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        self.outcome.as_ref().err()
    }

    /// Entries appended during this call.
    pub fn steps(&self) -> &[StepEntry] {
        &self.steps
    }

    pub fn into_result(self) -> Result<R, WorkflowError> {
        self.outcome
    }
}

#[derive(Serialize)]
struct WireResult<'a, R> {
    success: bool,
    #[serde(flatten)]
    receipt: Option<&'a R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    steps: &'a [StepEntry],
}

impl<R: Serialize> Serialize for WorkflowResult<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireResult {
            success: self.is_success(),
            receipt: self.receipt(),
            error: self.error().map(ToString::to_string),
            steps: &self.steps,
        }
        .serialize(serializer)
    }
}
