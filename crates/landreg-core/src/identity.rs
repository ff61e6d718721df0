//! # Parcel Identifiers
//!
//! A [`ParcelId`] joins the private, public-metadata, and ledger tiers of
//! one land parcel. It is generated once at registration and never
//! regenerated; transfers carry the existing identifier.
//!
//! Format: `<plotNumber>|<district>|GovRef-<6 chars of 0-9A-Z>`.
//!
//! The suffix is a reference tag, not a secret, so it is drawn from the
//! thread RNG rather than a CSPRNG. Six base-36 characters give 36^6
//! (about 2.2 billion) suffixes per plot and district.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Separator between the parts of a parcel identifier.
pub const PARCEL_ID_SEPARATOR: char = '|';

/// Prefix of the random reference suffix.
pub const GOV_REF_PREFIX: &str = "GovRef-";

/// Length of the random reference suffix.
pub const GOV_REF_LEN: usize = 6;

const BASE36_UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Stable identifier for a land parcel.
///
/// Identifiers produced by [`ParcelId::generate()`] are always well formed.
/// Identifiers handed back by the ledger are accepted verbatim through
/// [`ParcelId::new()`], since the ledger is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParcelId(String);

/// The three parts of a well-formed parcel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParcelIdParts<'a> {
    pub plot_number: &'a str,
    pub district: &'a str,
    pub reference: &'a str,
}

impl ParcelId {
    /// Derive a fresh identifier for a plot in a district.
    pub fn generate(plot_number: &str, district: &str) -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..GOV_REF_LEN)
            .map(|_| BASE36_UPPER[rng.gen_range(0..BASE36_UPPER.len())] as char)
            .collect();
        Self(format!(
            "{plot_number}{PARCEL_ID_SEPARATOR}{district}{PARCEL_ID_SEPARATOR}{GOV_REF_PREFIX}{suffix}"
        ))
    }

    /// Wrap an identifier obtained elsewhere (ledger reply, CLI argument).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into plot number, district, and reference suffix.
    ///
    /// Splits from the right, so a plot number containing `|` still parses.
    /// Returns `None` if the identifier does not have the generated shape.
    pub fn parts(&self) -> Option<ParcelIdParts<'_>> {
        let mut it = self.0.rsplitn(3, PARCEL_ID_SEPARATOR);
        let reference = it.next()?;
        let district = it.next()?;
        let plot_number = it.next()?;
        let suffix = reference.strip_prefix(GOV_REF_PREFIX)?;
        let suffix_ok = suffix.len() == GOV_REF_LEN
            && suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase());
        if !suffix_ok || plot_number.is_empty() || district.is_empty() {
            return None;
        }
        Some(ParcelIdParts {
            plot_number,
            district,
            reference,
        })
    }

    /// Whether this identifier has the generated `plot|district|GovRef-XXXXXX` shape.
    pub fn is_well_formed(&self) -> bool {
        self.parts().is_some()
    }
}

impl std::fmt::Display for ParcelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ParcelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
