//! Document store contract and HTTP client.
//!
//! `POST {base}/documents` with the raw document bytes as body,
//! `Content-Type` set to the document's content type and `X-Document-Type`
//! naming the registry document kind. Reply: `{"url": "..."}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CollaboratorError;
use crate::http::{endpoint, send_json};

/// Header carrying the registry document kind (deed, survey plan, ...).
pub const DOCUMENT_TYPE_HEADER: &str = "X-Document-Type";

/// A document to upload.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    /// Registry document kind, used as the key in the private tier's URL map.
    pub doc_type: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(doc_type: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            doc_type: doc_type.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

// Document bodies can be large and sensitive; Debug prints only their size.
impl std::fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("doc_type", &self.doc_type)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Where an uploaded document now lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub url: String,
}

/// Blob storage for registration and transfer documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store one document and return its URL.
    async fn upload(&self, document: &DocumentUpload) -> Result<StoredDocument, CollaboratorError>;
}

/// HTTP client for the document store.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpDocumentStore {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn upload(&self, document: &DocumentUpload) -> Result<StoredDocument, CollaboratorError> {
        let url = endpoint(&self.base_url, &["documents"])?;
        tracing::debug!(doc_type = %document.doc_type, len = document.bytes.len(), "uploading document");
        let request = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, document.content_type.as_str())
            .header(DOCUMENT_TYPE_HEADER, document.doc_type.as_str())
            .body(document.bytes.clone());
        send_json(request, "document_store.upload").await
    }
}
