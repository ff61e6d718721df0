//! # landreg-core — Foundational Types for the Tiered Land Registry
//!
//! Every other crate in the workspace depends on `landreg-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** All integrity digests flow through
//!    `CanonicalBytes::new()`. Two logically equal records hash identically
//!    regardless of field insertion order.
//!
//! 2. **Hex digests with an explicit ledger form.** [`record_digest()`] is
//!    the single hashing entry point; [`ledger_form()`] applies the `0x`
//!    prefix the ledger stores.
//!
//! 3. **Newtype identifiers.** [`ParcelId`] is the join key across the
//!    private, public-metadata, and ledger tiers.
//!
//! 4. **UTC-only timestamps.** [`Timestamp`] is second-precision with a `Z`
//!    suffix so timestamps canonicalize deterministically.
//!
//! 5. **Roles are claims, not inferences.** [`CallerClaims`] is handed in
//!    by the authentication layer. Unknown roles parse to
//!    [`Role::Unrecognized`], which sees nothing.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `landreg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod role;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use digest::{ledger_form, record_digest, sha256_digest, ContentDigest, LEDGER_HASH_PREFIX};
pub use error::{CanonicalizationError, LandRegError};
pub use identity::{ParcelId, ParcelIdParts};
pub use role::{CallerClaims, Role, Visibility};
pub use temporal::Timestamp;
