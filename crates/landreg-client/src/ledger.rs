//! Ledger contract and HTTP client.
//!
//! The ledger is the append-only ownership record. Endpoints:
//!
//! - `POST {base}/parcels`: register, reply `{parcelId, transactionRef}`
//! - `GET {base}/parcels/{parcelId}`: current ownership status
//! - `POST {base}/parcels/{parcelId}/transfer`: reply `{transactionRef}`

use async_trait::async_trait;
use landreg_core::ParcelId;
use landreg_tier::SeparatedTiers;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CollaboratorError;
use crate::http::{endpoint, send_json};

/// Registration payload for a new parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRegistration {
    pub parcel_id: ParcelId,
    pub district: String,
    pub owner_address: String,
    pub public_meta_cid: String,
    /// Ledger form (`0x`-prefixed) of the private-tier digest.
    pub private_data_hash: String,
}

impl LedgerRegistration {
    /// Build the payload from separated tiers. The content identifier must
    /// already have been recorded on the ledger record.
    pub fn from_tiers(tiers: &SeparatedTiers) -> Self {
        Self {
            parcel_id: tiers.ledger.parcel_id.clone(),
            district: tiers.public_metadata.district.clone(),
            owner_address: tiers.ledger.owner_address.clone(),
            public_meta_cid: tiers.ledger.public_meta_cid.clone(),
            private_data_hash: tiers.ledger.private_data_hash.clone(),
        }
    }
}

/// Ledger reply to a registration. The returned parcel identifier is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReceipt {
    pub parcel_id: ParcelId,
    pub transaction_ref: String,
}

/// Current ownership status of a parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipStatus {
    pub parcel_id: ParcelId,
    pub owner_address: String,
    #[serde(default)]
    pub gov_verified: bool,
    #[serde(default)]
    pub public_verified: bool,
    /// Any further fields the ledger reports.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Ownership transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub parcel_id: ParcelId,
    pub new_owner_address: String,
}

/// Ledger reply to a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAck {
    pub transaction_ref: String,
}

/// The immutable ownership ledger.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn register(&self, registration: &LedgerRegistration) -> Result<LedgerReceipt, CollaboratorError>;

    async fn status(&self, parcel_id: &ParcelId) -> Result<OwnershipStatus, CollaboratorError>;

    async fn transfer(&self, request: &TransferRequest) -> Result<TransferAck, CollaboratorError>;
}

/// HTTP client for the ledger gateway.
#[derive(Debug, Clone)]
pub struct HttpLedger {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpLedger {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl Ledger for HttpLedger {
    async fn register(&self, registration: &LedgerRegistration) -> Result<LedgerReceipt, CollaboratorError> {
        let url = endpoint(&self.base_url, &["parcels"])?;
        tracing::debug!(parcel_id = %registration.parcel_id, "registering parcel on ledger");
        send_json(self.http.post(url).json(registration), "ledger.register").await
    }

    async fn status(&self, parcel_id: &ParcelId) -> Result<OwnershipStatus, CollaboratorError> {
        let url = endpoint(&self.base_url, &["parcels", parcel_id.as_str()])?;
        send_json(self.http.get(url), "ledger.status").await
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<TransferAck, CollaboratorError> {
        let url = endpoint(&self.base_url, &["parcels", request.parcel_id.as_str(), "transfer"])?;
        tracing::debug!(parcel_id = %request.parcel_id, "submitting ownership transfer");
        send_json(self.http.post(url).json(request), "ledger.transfer").await
    }
}
