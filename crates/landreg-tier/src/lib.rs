//! # landreg-tier — Privacy Tiers for Land Registrations
//!
//! One registration is split into three tiers with different audiences:
//!
//! - **Private** (`record.rs`): owner identity, contact details, document
//!   URLs, tax and mortgage details. Officers and admins only.
//! - **Public metadata** (`record.rs`): descriptive parcel data plus the hex
//!   digest of the private tier. Published to a content-addressed store.
//! - **Ledger** (`record.rs`): the minimal durable proof, restating the
//!   private digest in `0x` form.
//!
//! ## Components
//!
//! - **Separator** (`separator.rs`): raw input to the three tiers, with the
//!   hash linkage established at creation.
//! - **Projection** (`projection.rs`): the subset of the tiers a caller role
//!   may see. Visibility nests strictly: public ⊆ citizen ⊆ officer/admin.
//! - **Integrity** (`integrity.rs`): recomputes the private digest and checks
//!   both links. Reports `false`, never errors.
//!
//! All three are pure: no I/O, no logging, inputs never mutated.

pub mod error;
pub mod integrity;
pub mod projection;
pub mod record;
pub mod separator;

pub use error::TierError;
pub use integrity::{verify, verify_tiers, IntegrityReport};
pub use projection::{project, LedgerView, RoleProjection};
pub use record::{
    Coordinates, LedgerRecord, PrivateTier, PublicDocument, PublicMetadataTier,
    RawRegistrationInput, SeparatedTiers, VerificationStatus,
};
pub use separator::{separate, separate_at};
