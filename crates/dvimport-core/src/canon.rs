//! Canonical form for order-insensitive comparison of JSON values.
//!
//! Two values that differ only in object key order or array element order
//! canonicalize to equal [`CanonicalValue`]s.
//!
//! # Canonicalization rules
//!
//! 1. Objects become a sorted `Sequence` of `Entry(key, value)` items.
//! 2. Arrays become a sorted `Sequence`; every array is treated as unordered.
//! 3. Scalars are kept as they are.
//!
//! Sorting uses a total order with a fixed kind precedence:
//! `Null < Bool < Number < String < Entry < Sequence`. Numbers compare by
//! exact numeric value, so `1` and `1.0` are equal while `2^53 + 1` and
//! `2^53 as f64` are not.
//!
//! An empty object and an empty array both become an empty `Sequence` and
//! are indistinguishable after canonicalization.

use serde::ser::{SerializeSeq, SerializeTuple};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::fmt;

/// A JSON number with a total order.
#[derive(Debug, Clone)]
pub struct CanonicalNumber(Number);

impl CanonicalNumber {
    fn as_integer(&self) -> Option<i128> {
        self.0
            .as_i64()
            .map(i128::from)
            .or_else(|| self.0.as_u64().map(i128::from))
    }

    fn as_float(&self) -> f64 {
        self.0.as_f64().unwrap_or(f64::NAN)
    }
}

impl From<Number> for CanonicalNumber {
    fn from(n: Number) -> Self {
        CanonicalNumber(n)
    }
}

impl Ord for CanonicalNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_integer(), other.as_integer()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(a), None) => cmp_integer_float(a, other.as_float()),
            (None, Some(b)) => cmp_integer_float(b, self.as_float()).reverse(),
            (None, None) => {
                let (a, b) = (self.as_float(), other.as_float());
                // -0.0 and 0.0 are the same number
                if a == b {
                    Ordering::Equal
                } else {
                    a.total_cmp(&b)
                }
            }
        }
    }
}

/// Exact comparison of an integer with a float, without rounding the integer.
fn cmp_integer_float(int: i128, float: f64) -> Ordering {
    // i128 covers [-2^127, 2^127)
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    if float.is_nan() {
        return Ordering::Less;
    }
    let whole = float.trunc();
    if whole >= LIMIT {
        return Ordering::Less;
    }
    if whole < -LIMIT {
        return Ordering::Greater;
    }
    match int.cmp(&(whole as i128)) {
        Ordering::Equal if float > whole => Ordering::Less,
        Ordering::Equal if float < whole => Ordering::Greater,
        ordering => ordering,
    }
}

impl PartialOrd for CanonicalNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CanonicalNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CanonicalNumber {}

/// Deterministically ordered representation of a JSON value.
///
/// Variant order is the cross-kind sort precedence; the derived `Ord`
/// relies on it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CanonicalValue {
    Null,
    Bool(bool),
    Number(CanonicalNumber),
    String(String),
    /// One `(key, value)` pair of a former object.
    Entry(String, Box<CanonicalValue>),
    Sequence(Vec<CanonicalValue>),
}

/// Canonicalize a JSON value.
pub fn canonicalize(value: &Value) -> CanonicalValue {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<CanonicalValue> = map
                .iter()
                .map(|(k, v)| CanonicalValue::Entry(k.clone(), Box::new(canonicalize(v))))
                .collect();
            entries.sort();
            CanonicalValue::Sequence(entries)
        }
        Value::Array(items) => {
            let mut elements: Vec<CanonicalValue> = items.iter().map(canonicalize).collect();
            elements.sort();
            CanonicalValue::Sequence(elements)
        }
        Value::Null => CanonicalValue::Null,
        Value::Bool(b) => CanonicalValue::Bool(*b),
        Value::Number(n) => CanonicalValue::Number(n.clone().into()),
        Value::String(s) => CanonicalValue::String(s.clone()),
    }
}

impl CanonicalValue {
    /// Re-apply canonicalization. A no-op on any value produced by
    /// [`canonicalize`].
    pub fn canonicalize(self) -> Self {
        match self {
            CanonicalValue::Entry(key, value) => {
                CanonicalValue::Entry(key, Box::new(value.canonicalize()))
            }
            CanonicalValue::Sequence(items) => {
                let mut items: Vec<_> = items.into_iter().map(CanonicalValue::canonicalize).collect();
                items.sort();
                CanonicalValue::Sequence(items)
            }
            scalar => scalar,
        }
    }

    /// Content digest of the canonical JSON rendering.
    pub fn digest(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        format!("blake3:{}", blake3::hash(&bytes))
    }
}

impl Serialize for CanonicalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CanonicalValue::Null => serializer.serialize_unit(),
            CanonicalValue::Bool(b) => serializer.serialize_bool(*b),
            CanonicalValue::Number(n) => n.0.serialize(serializer),
            CanonicalValue::String(s) => serializer.serialize_str(s),
            CanonicalValue::Entry(key, value) => {
                let mut tuple = serializer.serialize_tuple(2)?;
                tuple.serialize_element(key)?;
                tuple.serialize_element(value.as_ref())?;
                tuple.end()
            }
            CanonicalValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
