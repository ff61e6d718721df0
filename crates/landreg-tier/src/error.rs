//! Tier separation errors.

use landreg_core::CanonicalizationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TierError {
    /// A required identifying field was absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The private tier could not be canonicalized for hashing.
    #[error("could not hash private tier: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
