//! Private reference store contract and HTTP client.
//!
//! `POST {base}/references` with the private tier and its access level.
//! Reply: `{"id": "..."}`.

use async_trait::async_trait;
use landreg_core::ParcelId;
use landreg_tier::PrivateTier;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CollaboratorError;
use crate::http::{endpoint, send_json};

/// Access level attached to every stored private tier.
pub const ADMIN_ONLY: &str = "admin-only";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateReferenceRequest {
    pub parcel_id: ParcelId,
    pub private_data: PrivateTier,
    pub access_level: String,
    /// Whether `private_data` is encrypted. Always `false`; encryption at
    /// rest belongs to the store.
    pub encrypted: bool,
}

impl PrivateReferenceRequest {
    pub fn admin_only(parcel_id: ParcelId, private_data: PrivateTier) -> Self {
        Self {
            parcel_id,
            private_data,
            access_level: ADMIN_ONLY.to_string(),
            encrypted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateReference {
    pub id: String,
}

/// Access-controlled storage for private tiers.
#[async_trait]
pub trait PrivateReferenceStore: Send + Sync {
    async fn register(&self, request: &PrivateReferenceRequest) -> Result<PrivateReference, CollaboratorError>;
}

/// HTTP client for the private reference store.
#[derive(Debug, Clone)]
pub struct HttpPrivateReferenceStore {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpPrivateReferenceStore {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl PrivateReferenceStore for HttpPrivateReferenceStore {
    async fn register(&self, request: &PrivateReferenceRequest) -> Result<PrivateReference, CollaboratorError> {
        let url = endpoint(&self.base_url, &["references"])?;
        tracing::debug!(parcel_id = %request.parcel_id, access_level = %request.access_level, "storing private reference");
        send_json(self.http.post(url).json(request), "private_store.register").await
    }
}
