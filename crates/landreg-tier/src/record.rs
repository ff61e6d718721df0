//! # Tier Records
//!
//! Field names serialize in camelCase. The serialized form of
//! [`PrivateTier`] is what gets hashed, so adding, renaming, or removing a
//! field here changes every private digest computed afterwards.
//!
//! Measurements (area, coordinates) are decimal strings; the canonicalizer
//! rejects floats.

use std::collections::BTreeMap;

use landreg_core::{ParcelId, Timestamp};
use serde::{Deserialize, Serialize};

/// Latitude and longitude as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

/// Caller-supplied registration data before classification.
///
/// Every field defaults to empty so that absent identifying fields surface as
/// [`crate::TierError::MissingField`] from the separator instead of a serde
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRegistrationInput {
    pub plot_number: String,
    pub district: String,
    pub province: String,
    pub land_type: String,
    pub land_use: String,
    pub area: String,
    pub coordinates: Option<Coordinates>,

    pub owner_name: String,
    pub nic: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub owner_wallet_address: String,

    pub tax_reference: Option<String>,
    pub mortgage_details: Option<String>,

    /// Document type to stored URL.
    pub document_urls: BTreeMap<String, String>,
}

/// Owner-identifying and sensitive fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrivateTier {
    pub owner_name: String,
    pub nic: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub document_urls: BTreeMap<String, String>,
    pub tax_reference: Option<String>,
    pub mortgage_details: Option<String>,
    pub created_at: Timestamp,
}

/// Verification state shown on the public record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

/// Public descriptor of an uploaded document. Carries no URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PublicDocument {
    pub doc_type: String,
    pub available: bool,
}

/// Non-identifying descriptive fields, published to a content-addressed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PublicMetadataTier {
    pub parcel_id: ParcelId,
    pub plot_number: String,
    pub district: String,
    pub province: String,
    pub land_type: String,
    pub land_use: String,
    pub area: String,
    pub coordinates: Option<Coordinates>,
    pub registration_date: Timestamp,
    pub verification_status: VerificationStatus,
    pub public_documents: Vec<PublicDocument>,
    /// Hex SHA-256 of the canonical private tier at creation.
    pub private_data_hash: String,
    pub last_updated: Timestamp,
    /// Content identifier, set once the tier has been published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

/// Minimal durable proof of ownership written to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LedgerRecord {
    pub parcel_id: ParcelId,
    pub owner_address: String,
    /// Empty until the public tier is published.
    pub public_meta_cid: String,
    /// `0x` + the public tier's `private_data_hash`.
    pub private_data_hash: String,
    pub gov_verified: bool,
    pub public_verified: bool,
}

/// The three tiers of one registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeparatedTiers {
    pub private: PrivateTier,
    pub public_metadata: PublicMetadataTier,
    pub ledger: LedgerRecord,
}

impl SeparatedTiers {
    pub fn parcel_id(&self) -> &ParcelId {
        &self.ledger.parcel_id
    }

    /// Record the content identifier returned by the publish step on both
    /// the public tier and the ledger record. Neither field is covered by
    /// the private digest, so the hash linkage is unaffected.
    pub fn record_publication(&mut self, content_id: &str) {
        self.public_metadata.content_id = Some(content_id.to_string());
        self.ledger.public_meta_cid = content_id.to_string();
    }
}
