//! # landreg-client
//!
//! Contracts for the four services a registration touches, with an HTTP
//! client and an in-process implementation of each:
//!
//! | Service | Trait | HTTP | In-memory |
//! |---------|-------|------|-----------|
//! | Document store | [`DocumentStore`] | [`HttpDocumentStore`] | [`InMemoryDocumentStore`] |
//! | Content publish | [`ContentPublisher`] | [`HttpContentPublisher`] | [`InMemoryContentStore`] |
//! | Ledger | [`Ledger`] | [`HttpLedger`] | [`InMemoryLedger`] |
//! | Private reference store | [`PrivateReferenceStore`] | [`HttpPrivateReferenceStore`] | [`InMemoryPrivateStore`] |
//!
//! The workflow orchestrator receives them bundled as [`Collaborators`] and
//! never constructs a client itself.

pub mod config;
pub mod documents;
pub mod error;
pub(crate) mod http;
pub mod ledger;
pub mod memory;
pub mod private_store;
pub mod publish;

use std::sync::Arc;

pub use config::{ClientConfig, ConfigError};
pub use documents::{DocumentStore, DocumentUpload, HttpDocumentStore, StoredDocument, DOCUMENT_TYPE_HEADER};
pub use error::CollaboratorError;
pub use ledger::{
    HttpLedger, Ledger, LedgerReceipt, LedgerRegistration, OwnershipStatus, TransferAck, TransferRequest,
};
pub use memory::{InMemoryContentStore, InMemoryDocumentStore, InMemoryLedger, InMemoryPrivateStore};
pub use private_store::{
    HttpPrivateReferenceStore, PrivateReference, PrivateReferenceRequest, PrivateReferenceStore, ADMIN_ONLY,
};
pub use publish::{ContentPublisher, HttpContentPublisher, PublishReceipt};

/// The collaborator set injected into a workflow.
#[derive(Clone)]
pub struct Collaborators {
    pub documents: Arc<dyn DocumentStore>,
    pub publisher: Arc<dyn ContentPublisher>,
    pub ledger: Arc<dyn Ledger>,
    pub private_store: Arc<dyn PrivateReferenceStore>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

impl Collaborators {
    /// HTTP clients sharing one connection pool and bearer token.
    pub fn http(config: &ClientConfig) -> Result<Self, CollaboratorError> {
        let client = http::build_client(config)?;
        Ok(Self {
            documents: Arc::new(HttpDocumentStore::new(client.clone(), config.document_store_url.clone())),
            publisher: Arc::new(HttpContentPublisher::new(client.clone(), config.publish_url.clone())),
            ledger: Arc::new(HttpLedger::new(client.clone(), config.ledger_url.clone())),
            private_store: Arc::new(HttpPrivateReferenceStore::new(client, config.private_store_url.clone())),
        })
    }

    /// Fresh in-process stores with nothing shared.
    pub fn in_memory() -> Self {
        InMemoryStores::default().collaborators()
    }
}

/// Handles onto a set of in-memory stores. Keep this around to inspect what
/// a workflow wrote; [`InMemoryStores::collaborators`] hands out clones that
/// share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStores {
    pub documents: InMemoryDocumentStore,
    pub content: InMemoryContentStore,
    pub ledger: InMemoryLedger,
    pub private_store: InMemoryPrivateStore,
}

impl InMemoryStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            documents: Arc::new(self.documents.clone()),
            publisher: Arc::new(self.content.clone()),
            ledger: Arc::new(self.ledger.clone()),
            private_store: Arc::new(self.private_store.clone()),
        }
    }
}
