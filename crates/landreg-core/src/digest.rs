//! # Integrity Digests
//!
//! SHA-256 over [`CanonicalBytes`]. Every hash that links one tier to another
//! is produced by [`record_digest()`], so the public-metadata tier and the
//! ledger record always agree on how a private tier is hashed.
//!
//! Two renderings of the same digest circulate:
//!
//! - the plain lowercase hex form, stored in the public-metadata tier;
//! - the ledger form, `0x` followed by the same hex, stored on the ledger.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::CanonicalizationError;

/// Prefix the ledger puts in front of a hex digest.
pub const LEDGER_HASH_PREFIX: &str = "0x";

/// A raw 32-byte SHA-256 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest(pub [u8; 32]);

impl ContentDigest {
    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// SHA-256 of canonical bytes.
///
/// Takes `&CanonicalBytes`, not `&[u8]`, so no caller can hash a
/// non-canonical serialization by accident.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest(bytes)
}

/// Hash a structured record: canonicalize, SHA-256, lowercase hex.
///
/// Deterministic for logically equal records. Fails only for records that
/// contain floats, which none of the registry tiers do.
pub fn record_digest(record: &impl Serialize) -> Result<String, CanonicalizationError> {
    let cb = CanonicalBytes::new(record)?;
    Ok(sha256_digest(&cb).to_hex())
}

/// The ledger rendering of a hex digest: `0x` + hex.
pub fn ledger_form(hex_digest: &str) -> String {
    format!("{LEDGER_HASH_PREFIX}{hex_digest}")
}
