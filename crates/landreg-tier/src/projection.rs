//! # Role Projection
//!
//! | visibility | role(s) | private | public metadata | ledger |
//! |---|---|---|---|---|
//! | `Full` | admin, officer | all | all | all |
//! | `Citizen` | citizen, user | none | all | parcelId, ownerAddress, govVerified, publicVerified |
//! | `Public` | public | none | none | parcelId, ownerAddress, govVerified |
//! | `None` | anything else | none | none | none |
//!
//! Each row's field set contains the row below it. An unrecognised role
//! lands on the last row rather than failing.

use std::collections::BTreeSet;

use landreg_core::{ParcelId, Role, Visibility};
use serde::Serialize;
use serde_json::Value;

use crate::record::{LedgerRecord, PrivateTier, PublicMetadataTier, SeparatedTiers};

/// The part of a ledger record a role may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerView {
    pub parcel_id: ParcelId,
    pub owner_address: String,
    pub gov_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_meta_cid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_data_hash: Option<String>,
}

impl LedgerView {
    fn full(ledger: &LedgerRecord) -> Self {
        Self {
            parcel_id: ledger.parcel_id.clone(),
            owner_address: ledger.owner_address.clone(),
            gov_verified: ledger.gov_verified,
            public_verified: Some(ledger.public_verified),
            public_meta_cid: Some(ledger.public_meta_cid.clone()),
            private_data_hash: Some(ledger.private_data_hash.clone()),
        }
    }

    fn citizen(ledger: &LedgerRecord) -> Self {
        Self {
            public_meta_cid: None,
            private_data_hash: None,
            ..Self::full(ledger)
        }
    }

    fn public(ledger: &LedgerRecord) -> Self {
        Self {
            public_verified: None,
            ..Self::citizen(ledger)
        }
    }
}

/// A read-only, role-scoped view of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleProjection {
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<PrivateTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_metadata: Option<PublicMetadataTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger: Option<LedgerView>,
}

impl RoleProjection {
    fn empty() -> Self {
        Self {
            visibility: Visibility::None,
            private: None,
            public_metadata: None,
            ledger: None,
        }
    }

    /// True when the projection exposes nothing.
    pub fn is_empty(&self) -> bool {
        self.private.is_none() && self.public_metadata.is_none() && self.ledger.is_none()
    }

    /// Qualified names (`section.field`) of every field this projection exposes.
    pub fn fields(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let Ok(Value::Object(sections)) = serde_json::to_value(self) else {
            return out;
        };
        for (section, body) in sections {
            if let Value::Object(fields) = body {
                out.extend(fields.keys().map(|k| format!("{section}.{k}")));
            }
        }
        out
    }
}

/// Project the tiers for a caller role.
pub fn project(tiers: &SeparatedTiers, role: Role) -> RoleProjection {
    let visibility = role.visibility();
    match visibility {
        Visibility::Full => RoleProjection {
            visibility,
            private: Some(tiers.private.clone()),
            public_metadata: Some(tiers.public_metadata.clone()),
            ledger: Some(LedgerView::full(&tiers.ledger)),
        },
        Visibility::Citizen => RoleProjection {
            visibility,
            private: None,
            public_metadata: Some(tiers.public_metadata.clone()),
            ledger: Some(LedgerView::citizen(&tiers.ledger)),
        },
        Visibility::Public => RoleProjection {
            visibility,
            private: None,
            public_metadata: None,
            ledger: Some(LedgerView::public(&tiers.ledger)),
        },
        Visibility::None => RoleProjection::empty(),
    }
}
