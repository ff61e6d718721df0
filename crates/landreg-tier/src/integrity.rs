//! # Cross-Tier Integrity Verification
//!
//! Recomputes the private-tier digest and checks both links:
//!
//! - private → public: `digest(private) == public.privateDataHash`
//! - public → ledger: `"0x" + public.privateDataHash == ledger.privateDataHash`
//!
//! A mismatch is a finding, not an error; the verifier always returns a
//! report.

use landreg_core::{ledger_form, record_digest};
use serde::{Deserialize, Serialize};

use crate::record::{LedgerRecord, PrivateTier, PublicMetadataTier, SeparatedTiers};

/// Outcome of a cross-tier integrity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    pub private_to_public: bool,
    #[serde(rename = "publicToBlockchain")]
    pub public_to_ledger: bool,
    pub overall_integrity: bool,
}

/// Check the hash links between a private tier, its public tier, and its
/// ledger record.
pub fn verify(
    private: &PrivateTier,
    public: &PublicMetadataTier,
    ledger: &LedgerRecord,
) -> IntegrityReport {
    let private_to_public = match record_digest(private) {
        Ok(recomputed) => recomputed == public.private_data_hash,
        Err(_) => false,
    };
    let public_to_ledger = ledger_form(&public.private_data_hash) == ledger.private_data_hash;
    IntegrityReport {
        private_to_public,
        public_to_ledger,
        overall_integrity: private_to_public && public_to_ledger,
    }
}

/// [`verify`] over a [`SeparatedTiers`] bundle.
pub fn verify_tiers(tiers: &SeparatedTiers) -> IntegrityReport {
    verify(&tiers.private, &tiers.public_metadata, &tiers.ledger)
}
