//! # Tier Separator
//!
//! Splits a [`RawRegistrationInput`] into private, public-metadata, and
//! ledger tiers and links them:
//!
//! ```text
//! public.privateDataHash == hex(sha256(jcs(private)))
//! ledger.privateDataHash == "0x" + public.privateDataHash
//! ```
//!
//! The parcel identifier is generated here, once, and shared by the public
//! tier and the ledger record.

use landreg_core::{ledger_form, record_digest, ParcelId, Timestamp};

use crate::error::TierError;
use crate::record::{
    LedgerRecord, PrivateTier, PublicDocument, PublicMetadataTier, RawRegistrationInput,
    SeparatedTiers, VerificationStatus,
};

/// Separate a registration using the current time.
pub fn separate(input: RawRegistrationInput) -> Result<SeparatedTiers, TierError> {
    separate_at(input, Timestamp::now())
}

/// Separate a registration with an explicit creation time.
///
/// # Errors
///
/// `MissingField` if the plot number or district is blank.
pub fn separate_at(
    input: RawRegistrationInput,
    now: Timestamp,
) -> Result<SeparatedTiers, TierError> {
    let plot_number = required(&input.plot_number, "plotNumber")?;
    let district = required(&input.district, "district")?;

    let public_documents = input
        .document_urls
        .keys()
        .map(|doc_type| PublicDocument {
            doc_type: doc_type.clone(),
            available: true,
        })
        .collect();

    let private = PrivateTier {
        owner_name: input.owner_name,
        nic: input.nic,
        phone: input.phone,
        email: input.email,
        address: input.address,
        document_urls: input.document_urls,
        tax_reference: input.tax_reference,
        mortgage_details: input.mortgage_details,
        created_at: now,
    };
    let private_data_hash = record_digest(&private)?;

    let parcel_id = ParcelId::generate(&plot_number, &district);

    let ledger = LedgerRecord {
        parcel_id: parcel_id.clone(),
        owner_address: input.owner_wallet_address,
        public_meta_cid: String::new(),
        private_data_hash: ledger_form(&private_data_hash),
        gov_verified: false,
        public_verified: false,
    };

    let public_metadata = PublicMetadataTier {
        parcel_id,
        plot_number,
        district,
        province: input.province,
        land_type: input.land_type,
        land_use: input.land_use,
        area: input.area,
        coordinates: input.coordinates,
        registration_date: now,
        verification_status: VerificationStatus::Pending,
        public_documents,
        private_data_hash,
        last_updated: now,
        content_id: None,
    };

    Ok(SeparatedTiers {
        private,
        public_metadata,
        ledger,
    })
}

/// The trimmed value, or `MissingField` if nothing is left.
fn required(value: &str, field: &'static str) -> Result<String, TierError> {
    match value.trim() {
        "" => Err(TierError::MissingField(field)),
        trimmed => Ok(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_input() -> RawRegistrationInput {
        let mut document_urls = BTreeMap::new();
        document_urls.insert("deed".to_string(), "https://docs/deed.pdf".to_string());
        document_urls.insert("survey".to_string(), "https://docs/survey.pdf".to_string());
        RawRegistrationInput {
            plot_number: "1001".into(),
            district: "Colombo".into(),
            province: "Western".into(),
            land_type: "residential".into(),
            land_use: "housing".into(),
            area: "20.5".into(),
            owner_name: "Nimal Perera".into(),
            nic: "200112345V".into(),
            phone: "+94771234567".into(),
            email: "nimal@example.lk".into(),
            address: "12 Galle Road, Colombo 03".into(),
            owner_wallet_address: "0x298f".into(),
            tax_reference: Some("TIN-4471".into()),
            document_urls,
            ..Default::default()
        }
    }

    fn fixed_time() -> Timestamp {
        Timestamp::parse("2026-03-01T08:15:30Z").unwrap()
    }

    #[test]
    fn owner_fields_go_to_private_tier() {
        let tiers = separate_at(sample_input(), fixed_time()).unwrap();
        assert_eq!(tiers.private.owner_name, "Nimal Perera");
        assert_eq!(tiers.private.nic, "200112345V");
        assert_eq!(tiers.private.tax_reference.as_deref(), Some("TIN-4471"));
        assert_eq!(tiers.private.document_urls.len(), 2);
        assert_eq!(tiers.private.created_at, fixed_time());
    }

    #[test]
    fn public_tier_has_no_owner_data_or_urls() {
        let tiers = separate_at(sample_input(), fixed_time()).unwrap();
        let public = serde_json::to_string(&tiers.public_metadata).unwrap();
        for secret in ["Nimal", "200112345V", "+9477", "nimal@", "Galle Road", "https://docs"] {
            assert!(!public.contains(secret), "public tier leaked {secret}");
        }
        let doc_types: Vec<_> = tiers
            .public_metadata
            .public_documents
            .iter()
            .map(|d| d.doc_type.as_str())
            .collect();
        assert_eq!(doc_types, ["deed", "survey"]);
    }

    #[test]
    fn hashes_are_linked() {
        let tiers = separate_at(sample_input(), fixed_time()).unwrap();
        let expected = record_digest(&tiers.private).unwrap();
        assert_eq!(tiers.public_metadata.private_data_hash, expected);
        assert_eq!(tiers.ledger.private_data_hash, format!("0x{expected}"));
    }

    #[test]
    fn parcel_id_is_shared_and_well_formed() {
        let tiers = separate_at(sample_input(), fixed_time()).unwrap();
        assert_eq!(tiers.public_metadata.parcel_id, tiers.ledger.parcel_id);
        assert!(tiers
            .parcel_id()
            .as_str()
            .starts_with("1001|Colombo|GovRef-"));
        assert!(tiers.parcel_id().is_well_formed());
    }

    #[test]
    fn ledger_starts_unverified_and_unpublished() {
        let tiers = separate_at(sample_input(), fixed_time()).unwrap();
        assert_eq!(tiers.ledger.owner_address, "0x298f");
        assert!(tiers.ledger.public_meta_cid.is_empty());
        assert!(!tiers.ledger.gov_verified);
        assert!(!tiers.ledger.public_verified);
        assert_eq!(
            tiers.public_metadata.verification_status,
            VerificationStatus::Pending
        );
        assert!(tiers.public_metadata.content_id.is_none());
    }

    #[test]
    fn same_input_same_time_same_hash() {
        let a = separate_at(sample_input(), fixed_time()).unwrap();
        let b = separate_at(sample_input(), fixed_time()).unwrap();
        assert_eq!(
            a.public_metadata.private_data_hash,
            b.public_metadata.private_data_hash
        );
    }

    #[test]
    fn missing_plot_number_is_rejected() {
        let input = RawRegistrationInput {
            plot_number: "  ".into(),
            ..sample_input()
        };
        match separate(input) {
            Err(TierError::MissingField(field)) => assert_eq!(field, "plotNumber"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn missing_district_is_rejected() {
        let input = RawRegistrationInput {
            district: String::new(),
            ..sample_input()
        };
        assert!(matches!(
            separate(input),
            Err(TierError::MissingField("district"))
        ));
    }

    #[test]
    fn minimal_input_is_enough() {
        let input = RawRegistrationInput {
            plot_number: "1001".into(),
            district: "Colombo".into(),
            ..Default::default()
        };
        let tiers = separate(input).unwrap();
        assert!(tiers.public_metadata.public_documents.is_empty());
    }

    #[test]
    fn padded_plot_and_district_are_trimmed() {
        let input = RawRegistrationInput {
            plot_number: " 1001 ".into(),
            district: "\tColombo ".into(),
            ..sample_input()
        };
        let tiers = separate_at(input, fixed_time()).unwrap();
        let id = tiers.parcel_id();
        assert!(id.as_str().starts_with("1001|Colombo|GovRef-"), "{id}");
        assert!(id.is_well_formed());
        assert_eq!(tiers.public_metadata.plot_number, "1001");
        assert_eq!(tiers.public_metadata.district, "Colombo");
        assert!(crate::verify_tiers(&tiers).overall_integrity);
    }

    #[test]
    fn record_publication_sets_both_cids() {
        let mut tiers = separate_at(sample_input(), fixed_time()).unwrap();
        let hash_before = tiers.public_metadata.private_data_hash.clone();
        tiers.record_publication("bafkexample");
        assert_eq!(tiers.public_metadata.content_id.as_deref(), Some("bafkexample"));
        assert_eq!(tiers.ledger.public_meta_cid, "bafkexample");
        assert_eq!(tiers.public_metadata.private_data_hash, hash_before);
    }
}
