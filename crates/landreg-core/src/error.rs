//! # Error Types
//!
//! Core-level errors. Pure operations over well-formed records do not fail;
//! these variants cover malformed input reaching the canonicalizer or the
//! timestamp parser.

use thiserror::Error;

/// Top-level error type for `landreg-core`.
#[derive(Error, Debug)]
pub enum LandRegError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A value did not match its expected shape.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in hashed records.
    #[error("float values are not permitted in canonical records; carry measurements as decimal strings: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
