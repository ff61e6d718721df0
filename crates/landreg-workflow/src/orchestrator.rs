//! # Workflow Orchestrator
//!
//! Drives a registration or an ownership transfer through the collaborators
//! one step at a time. Steps run strictly in sequence; the first failure
//! stops the call. Completed steps are not rolled back: uploaded documents
//! and published metadata stay where they are, and the returned step log is
//! the record to reconcile from.
//!
//! Each orchestrator is bound to one caller's claims and owns its step log.
//! Independent instances share nothing but the collaborators.

use std::collections::BTreeMap;

use landreg_client::{
    Collaborators, DocumentUpload, LedgerRegistration, PrivateReferenceRequest, TransferRequest,
};
use landreg_core::{CallerClaims, ParcelId};
use landreg_tier::{separate, RawRegistrationInput};

use crate::error::WorkflowError;
use crate::phase::{PhaseTracker, WorkflowKind, WorkflowPhase};
use crate::result::{RegistrationReceipt, RegistrationResult, TransferReceipt, TransferResult, WorkflowResult};
use crate::steps::StepLog;

pub struct WorkflowOrchestrator {
    claims: CallerClaims,
    collaborators: Collaborators,
    log: StepLog,
}

impl std::fmt::Debug for WorkflowOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowOrchestrator")
            .field("claims", &self.claims)
            .field("steps", &self.log.len())
            .finish_non_exhaustive()
    }
}

impl WorkflowOrchestrator {
    pub fn new(claims: CallerClaims, collaborators: Collaborators) -> Self {
        Self {
            claims,
            collaborators,
            log: StepLog::new(),
        }
    }

    /// Every entry appended by this instance, across all calls.
    pub fn steps(&self) -> &StepLog {
        &self.log
    }

    /// Upload documents, separate tiers, publish the public tier, register
    /// on the ledger, and (for privileged roles) store the private tier.
    #[tracing::instrument(skip_all, fields(role = %self.claims.role))]
    pub async fn register_land(
        &mut self,
        input: RawRegistrationInput,
        documents: Vec<DocumentUpload>,
    ) -> RegistrationResult {
        let mark = self.log.len();
        let mut run = PhaseTracker::new(WorkflowKind::Registration);
        let outcome = self.run_registration(&mut run, input, &documents).await;
        self.finish(run, mark, outcome)
    }

    /// Read current ownership, upload transfer documents, and submit the
    /// transfer. The ownership read is informational; its failure is logged
    /// and the transfer proceeds.
    #[tracing::instrument(skip_all, fields(role = %self.claims.role, parcel_id = %parcel_id))]
    pub async fn transfer_land(
        &mut self,
        parcel_id: &ParcelId,
        new_owner_address: &str,
        documents: Vec<DocumentUpload>,
    ) -> TransferResult {
        let mark = self.log.len();
        let mut run = PhaseTracker::new(WorkflowKind::Transfer);
        let outcome = self
            .run_transfer(&mut run, parcel_id, new_owner_address, &documents)
            .await;
        self.finish(run, mark, outcome)
    }

    async fn run_registration(
        &mut self,
        run: &mut PhaseTracker,
        mut input: RawRegistrationInput,
        documents: &[DocumentUpload],
    ) -> Result<RegistrationReceipt, WorkflowError> {
        self.log.info(
            run.phase(),
            format!("Starting registration of plot {} in {}", input.plot_number, input.district),
        );

        if !documents.is_empty() {
            self.enter(run, WorkflowPhase::UploadingDocuments, "Uploading documents")?;
            let urls = self.upload_documents(run.phase(), documents).await?;
            input.document_urls.extend(urls);
        }

        self.enter(run, WorkflowPhase::Separating, "Separating record into tiers")?;
        let mut tiers = separate(input)?;
        self.log.success(
            run.phase(),
            format!("Tiers separated for parcel {}", tiers.parcel_id()),
        );

        self.enter(run, WorkflowPhase::PublishingMetadata, "Publishing public metadata")?;
        let published = self
            .collaborators
            .publisher
            .publish(&tiers.public_metadata)
            .await
            .map_err(WorkflowError::upload(WorkflowPhase::PublishingMetadata))?;
        tiers.record_publication(&published.content_id);
        self.log.success(
            run.phase(),
            format!("Public metadata published as {}", published.content_id),
        );

        self.enter(run, WorkflowPhase::RegisteringOnLedger, "Registering parcel on ledger")?;
        let registered = self
            .collaborators
            .ledger
            .register(&LedgerRegistration::from_tiers(&tiers))
            .await
            .map_err(WorkflowError::upload(WorkflowPhase::RegisteringOnLedger))?;
        self.log.success(
            run.phase(),
            format!(
                "Parcel {} registered on ledger (tx {})",
                registered.parcel_id, registered.transaction_ref
            ),
        );

        let role = self.claims.role;
        let private_reference_id = if role.is_privileged() {
            self.enter(
                run,
                WorkflowPhase::StoringPrivateReference,
                "Storing private data reference",
            )?;
            let request = PrivateReferenceRequest::admin_only(registered.parcel_id.clone(), tiers.private);
            let reference = self
                .collaborators
                .private_store
                .register(&request)
                .await
                .map_err(WorkflowError::upload(WorkflowPhase::StoringPrivateReference))?;
            self.log.success(run.phase(), format!("Private data stored as {}", reference.id));
            Some(reference.id)
        } else {
            self.log.info(
                run.phase(),
                format!("Private data storage skipped: role {role} may not store private data"),
            );
            None
        };

        self.enter(run, WorkflowPhase::Completed, "Registration completed")?;
        Ok(RegistrationReceipt {
            parcel_id: registered.parcel_id,
            content_id: published.content_id,
            ledger_tx_ref: registered.transaction_ref,
            private_data_stored: private_reference_id.is_some(),
            access_level: self.claims.role_label().to_string(),
            private_reference_id,
        })
    }

    async fn run_transfer(
        &mut self,
        run: &mut PhaseTracker,
        parcel_id: &ParcelId,
        new_owner_address: &str,
        documents: &[DocumentUpload],
    ) -> Result<TransferReceipt, WorkflowError> {
        self.log.info(
            run.phase(),
            format!("Starting transfer of {parcel_id} to {new_owner_address}"),
        );
        if new_owner_address.trim().is_empty() {
            return Err(WorkflowError::MissingField("newOwnerAddress"));
        }

        self.enter(run, WorkflowPhase::ReadingOwnership, "Reading current ownership")?;
        let previous_owner = match self.collaborators.ledger.status(parcel_id).await {
            Ok(status) => {
                self.log
                    .success(run.phase(), format!("Current owner is {}", status.owner_address));
                Some(status.owner_address)
            }
            Err(source) => {
                let err = WorkflowError::Lookup {
                    parcel_id: parcel_id.clone(),
                    source,
                };
                self.log.error(run.phase(), err.to_string());
                None
            }
        };

        let transfer_documents = if documents.is_empty() {
            BTreeMap::new()
        } else {
            self.enter(run, WorkflowPhase::UploadingDocuments, "Uploading transfer documents")?;
            self.upload_documents(run.phase(), documents).await?
        };

        self.enter(run, WorkflowPhase::SubmittingTransfer, "Submitting transfer to ledger")?;
        let ack = self
            .collaborators
            .ledger
            .transfer(&TransferRequest {
                parcel_id: parcel_id.clone(),
                new_owner_address: new_owner_address.to_string(),
            })
            .await
            .map_err(WorkflowError::upload(WorkflowPhase::SubmittingTransfer))?;
        self.log
            .success(run.phase(), format!("Transfer recorded (tx {})", ack.transaction_ref));

        self.enter(run, WorkflowPhase::Completed, "Transfer completed")?;
        Ok(TransferReceipt {
            parcel_id: parcel_id.clone(),
            new_owner: new_owner_address.to_string(),
            ledger_tx_ref: ack.transaction_ref,
            transfer_documents,
            previous_owner,
        })
    }

    /// Upload sequentially. A later document of the same type replaces the
    /// earlier URL.
    async fn upload_documents(
        &mut self,
        phase: WorkflowPhase,
        documents: &[DocumentUpload],
    ) -> Result<BTreeMap<String, String>, WorkflowError> {
        let mut urls = BTreeMap::new();
        for document in documents {
            let stored = self
                .collaborators
                .documents
                .upload(document)
                .await
                .map_err(WorkflowError::upload(phase))?;
            self.log.success(phase, format!("Uploaded {}", document.doc_type));
            urls.insert(document.doc_type.clone(), stored.url);
        }
        Ok(urls)
    }

    fn enter(
        &mut self,
        run: &mut PhaseTracker,
        next: WorkflowPhase,
        message: &str,
    ) -> Result<(), WorkflowError> {
        run.advance(next)?;
        if next == WorkflowPhase::Completed {
            self.log.success(next, message);
        } else {
            self.log.info(next, message);
        }
        Ok(())
    }

    fn finish<R>(
        &mut self,
        mut run: PhaseTracker,
        mark: usize,
        outcome: Result<R, WorkflowError>,
    ) -> WorkflowResult<R> {
        if let Err(err) = &outcome {
            self.log.error(run.phase(), err.to_string());
            run.fail();
        }
        tracing::debug!(kind = ?run.kind(), phases = ?run.history(), "workflow call finished");
        WorkflowResult::new(outcome, self.log.since(mark))
    }
}
