//! In-process collaborator implementations backed by `DashMap`.
//!
//! Used for offline CLI runs and tests. Each store is cheaply cloneable and
//! clones share state, so a test can keep a handle and inspect what the
//! workflow wrote.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use landreg_core::{record_digest, ParcelId};
use landreg_tier::PublicMetadataTier;
use uuid::Uuid;

use crate::documents::{DocumentStore, DocumentUpload, StoredDocument};
use crate::error::CollaboratorError;
use crate::ledger::{Ledger, LedgerReceipt, LedgerRegistration, OwnershipStatus, TransferAck, TransferRequest};
use crate::private_store::{PrivateReference, PrivateReferenceRequest, PrivateReferenceStore};
use crate::publish::{ContentPublisher, PublishReceipt};

/// Prefix of content identifiers minted by [`InMemoryContentStore`].
pub const CONTENT_ID_PREFIX: &str = "bafk";

#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<DashMap<String, DocumentUpload>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, url: &str) -> Option<DocumentUpload> {
        self.documents.get(url).map(|d| d.value().clone())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn upload(&self, document: &DocumentUpload) -> Result<StoredDocument, CollaboratorError> {
        if document.bytes.is_empty() {
            return Err(CollaboratorError::rejected("document_store.upload", "empty document"));
        }
        let url = format!("memory://documents/{}/{}", document.doc_type, Uuid::new_v4());
        self.documents.insert(url.clone(), document.clone());
        Ok(StoredDocument { url })
    }
}

/// Content-addressed store: the identifier is derived from the canonical
/// digest of the published record, so identical metadata gets the same id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    content: Arc<DashMap<String, PublicMetadataTier>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, content_id: &str) -> Option<PublicMetadataTier> {
        self.content.get(content_id).map(|c| c.value().clone())
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[async_trait]
impl ContentPublisher for InMemoryContentStore {
    async fn publish(&self, metadata: &PublicMetadataTier) -> Result<PublishReceipt, CollaboratorError> {
        let digest =
            record_digest(metadata).map_err(|e| CollaboratorError::rejected("content.publish", e.to_string()))?;
        let content_id = format!("{CONTENT_ID_PREFIX}{digest}");
        self.content.insert(content_id.clone(), metadata.clone());
        Ok(PublishReceipt {
            uri: format!("ipfs://{content_id}"),
            content_id,
        })
    }
}

/// Ledger that rejects duplicate registrations and transfers of unknown
/// parcels. Transaction references are sequential.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    parcels: Arc<DashMap<ParcelId, OwnershipStatus>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner_of(&self, parcel_id: &ParcelId) -> Option<String> {
        self.parcels.get(parcel_id).map(|s| s.owner_address.clone())
    }

    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }

    fn next_tx_ref(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        format!("0x{seq:064x}")
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn register(&self, registration: &LedgerRegistration) -> Result<LedgerReceipt, CollaboratorError> {
        match self.parcels.entry(registration.parcel_id.clone()) {
            Entry::Occupied(_) => Err(CollaboratorError::rejected(
                "ledger.register",
                format!("parcel {} already registered", registration.parcel_id),
            )),
            Entry::Vacant(slot) => {
                let mut extra = serde_json::Map::new();
                extra.insert("district".into(), registration.district.clone().into());
                extra.insert("publicMetaCid".into(), registration.public_meta_cid.clone().into());
                extra.insert("privateDataHash".into(), registration.private_data_hash.clone().into());
                slot.insert(OwnershipStatus {
                    parcel_id: registration.parcel_id.clone(),
                    owner_address: registration.owner_address.clone(),
                    gov_verified: false,
                    public_verified: false,
                    extra,
                });
                Ok(LedgerReceipt {
                    parcel_id: registration.parcel_id.clone(),
                    transaction_ref: self.next_tx_ref(),
                })
            }
        }
    }

    async fn status(&self, parcel_id: &ParcelId) -> Result<OwnershipStatus, CollaboratorError> {
        self.parcels
            .get(parcel_id)
            .map(|s| s.value().clone())
            .ok_or_else(|| CollaboratorError::rejected("ledger.status", format!("unknown parcel {parcel_id}")))
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<TransferAck, CollaboratorError> {
        let mut status = self.parcels.get_mut(&request.parcel_id).ok_or_else(|| {
            CollaboratorError::rejected("ledger.transfer", format!("unknown parcel {}", request.parcel_id))
        })?;
        status.owner_address = request.new_owner_address.clone();
        drop(status);
        Ok(TransferAck {
            transaction_ref: self.next_tx_ref(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPrivateStore {
    references: Arc<DashMap<String, PrivateReferenceRequest>>,
}

impl InMemoryPrivateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<PrivateReferenceRequest> {
        self.references.get(id).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

#[async_trait]
impl PrivateReferenceStore for InMemoryPrivateStore {
    async fn register(&self, request: &PrivateReferenceRequest) -> Result<PrivateReference, CollaboratorError> {
        let id = Uuid::new_v4().to_string();
        self.references.insert(id.clone(), request.clone());
        Ok(PrivateReference { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(id: &str) -> LedgerRegistration {
        LedgerRegistration {
            parcel_id: ParcelId::new(id),
            district: "Colombo".into(),
            owner_address: "0xaaa".into(),
            public_meta_cid: "bafkcid".into(),
            private_data_hash: "0xabc".into(),
        }
    }

    #[tokio::test]
    async fn ledger_rejects_duplicate_registration() {
        let ledger = InMemoryLedger::new();
        ledger.register(&registration("1|Colombo|GovRef-AAAAAA")).await.unwrap();
        let err = ledger.register(&registration("1|Colombo|GovRef-AAAAAA")).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Rejected { operation: "ledger.register", .. }));
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn ledger_transfer_updates_owner_and_sequences_refs() {
        let ledger = InMemoryLedger::new();
        let id = ParcelId::new("1|Colombo|GovRef-AAAAAA");
        let first = ledger.register(&registration(id.as_str())).await.unwrap();
        let ack = ledger
            .transfer(&TransferRequest {
                parcel_id: id.clone(),
                new_owner_address: "0xbbb".into(),
            })
            .await
            .unwrap();
        assert_eq!(ledger.owner_of(&id).as_deref(), Some("0xbbb"));
        assert_ne!(first.transaction_ref, ack.transaction_ref);
        assert_eq!(ack.transaction_ref.len(), 66);
    }

    #[tokio::test]
    async fn ledger_rejects_unknown_parcel_transfer() {
        let ledger = InMemoryLedger::new();
        let err = ledger
            .transfer(&TransferRequest {
                parcel_id: ParcelId::new("9|Kandy|GovRef-ZZZZZZ"),
                new_owner_address: "0xbbb".into(),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown parcel"));
    }

    #[tokio::test]
    async fn document_store_rejects_empty_body() {
        let store = InMemoryDocumentStore::new();
        assert!(store.upload(&DocumentUpload::new("deed", "application/pdf", vec![])).await.is_err());
        let stored = store
            .upload(&DocumentUpload::new("deed", "application/pdf", b"%PDF".to_vec()))
            .await
            .unwrap();
        assert!(stored.url.starts_with("memory://documents/deed/"));
        assert_eq!(store.get(&stored.url).unwrap().bytes, b"%PDF");
    }

    #[tokio::test]
    async fn private_store_keeps_request() {
        let store = InMemoryPrivateStore::new();
        let input = landreg_tier::RawRegistrationInput {
            plot_number: "1".into(),
            district: "Colombo".into(),
            owner_name: "Nimal".into(),
            ..Default::default()
        };
        let tiers = landreg_tier::separate(input).unwrap();
        let req = PrivateReferenceRequest::admin_only(tiers.parcel_id().clone(), tiers.private.clone());
        let reference = store.register(&req).await.unwrap();
        let kept = store.get(&reference.id).unwrap();
        assert_eq!(kept.access_level, "admin-only");
        assert!(!kept.encrypted);
        assert_eq!(kept.private_data.owner_name, "Nimal");
    }
}
