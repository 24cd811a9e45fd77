//! Argument fingerprints
//!
//! A fingerprint is the SHA-256 of the canonical JSON encoding of an
//! argument list. Encoding is order-preserving, so `["a", "b"]` and
//! `["b", "a"]` never share a cache slot, while two structurally equal lists
//! always do regardless of how they were built.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of leading bytes shown by [`Fingerprint::short`].
const SHORT_LEN: usize = 6;

/// Deterministic hash of a resolve call's arguments.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint any serializable argument list.
    pub fn of<A: Serialize + ?Sized>(arguments: &A) -> Result<Self, serde_json::Error> {
        let canonical = serde_json::to_vec(arguments)?;
        Ok(Self::from_canonical(&canonical))
    }

    /// Fingerprint of an already-encoded argument list.
    pub fn from_canonical(canonical: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(canonical);
        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        Self(hash)
    }

    /// Fingerprint of the empty argument list.
    pub fn empty() -> Self {
        Self::from_canonical(b"[]")
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Abbreviated hex form, used in log fields.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..SHORT_LEN])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_equal_arguments_share_fingerprint() {
        let a = Fingerprint::of(&[json!("morning"), json!(5)]).unwrap();
        let b = Fingerprint::of(&vec![Value::from("morning"), Value::from(5)]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_argument_order_matters() {
        let a = Fingerprint::of(&[json!("a"), json!("b")]).unwrap();
        let b = Fingerprint::of(&[json!("b"), json!("a")]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_list_and_empty_string_differ() {
        let none: [Value; 0] = [];
        let empty = Fingerprint::of(&none).unwrap();
        let blank = Fingerprint::of(&[json!("")]).unwrap();
        assert_eq!(empty, Fingerprint::empty());
        assert_ne!(empty, blank);
    }

    #[test]
    fn test_nested_list_is_not_flattened() {
        let flat = Fingerprint::of(&[json!(1), json!(2)]).unwrap();
        let nested = Fingerprint::of(&[json!([1, 2])]).unwrap();
        assert_ne!(flat, nested);
    }

    #[test]
    fn test_float_arguments_survive_json_round_trip() {
        let args = vec![json!(971381.3892657391_f64), json!(-0.1_f64), json!(1.0e-7_f64)];
        let encoded = serde_json::to_string(&args).unwrap();
        let decoded: Vec<Value> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, args);
        assert_eq!(Fingerprint::of(&args).unwrap(), Fingerprint::of(&decoded).unwrap());
    }

    #[test]
    fn test_display_is_full_hex() {
        let fp = Fingerprint::empty();
        assert_eq!(fp.to_string().len(), 64);
        assert!(fp.to_string().starts_with(&fp.short()));
        assert_eq!(fp.short().len(), SHORT_LEN * 2);
    }
}
