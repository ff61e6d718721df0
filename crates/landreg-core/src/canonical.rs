//! # Canonical Serialization
//!
//! `CanonicalBytes` is the sole construction path for bytes that feed an
//! integrity digest. A record is first lowered to a `serde_json::Value`,
//! checked for floats, then emitted as RFC 8785 (JSON Canonicalization
//! Scheme) bytes: object keys sorted, compact separators, UTF-8.
//!
//! ## Why floats are rejected
//!
//! JCS number formatting for non-integers differs across implementations,
//! so a float in a hashed record makes the digest depend on who computed
//! it. Land measurements (area, latitude, longitude) are carried as decimal
//! strings for this reason.
//!
//! ## Key order
//!
//! Serde emits struct fields in declaration order and maps in iteration
//! order. Neither matters here: JCS sorts every object, so a record built
//! with fields in any order produces the same bytes.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced by JCS canonicalization of a float-free record.
///
/// The inner buffer is private; the only constructor is
/// [`CanonicalBytes::new()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable record.
    ///
    /// # Errors
    ///
    /// `FloatRejected` if the record contains a non-integer number,
    /// `SerializationFailed` if serde cannot lower it to JSON.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// The canonical byte sequence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Walk the value tree and fail on the first non-integer number.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        Value::Object(map) => map.values().try_for_each(reject_floats),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn json_without_floats() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9 |-]{0,24}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-zA-Z]{1,10}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonicalization_is_deterministic(value in json_without_floats()) {
            let a = CanonicalBytes::new(&value).unwrap();
            let b = CanonicalBytes::new(&value).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn canonical_output_is_valid_json(value in json_without_floats()) {
            let cb = CanonicalBytes::new(&value).unwrap();
            let parsed: Result<Value, _> = serde_json::from_slice(cb.as_bytes());
            prop_assert!(parsed.is_ok());
        }

        #[test]
        fn reparsing_is_a_fixed_point(value in json_without_floats()) {
            let cb = CanonicalBytes::new(&value).unwrap();
            let reparsed: Value = serde_json::from_slice(cb.as_bytes()).unwrap();
            prop_assert_eq!(CanonicalBytes::new(&reparsed).unwrap(), cb);
        }
    }
}
