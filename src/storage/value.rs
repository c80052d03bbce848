//! Scalar value model for the key-value store.
//!
//! The host storage contract requires a tri-state per key: absent, explicit
//! null, or a value. Absence is expressed by `Option::None` at the store API;
//! this module supplies the value half: a small scalar enum covering the
//! primitive-compatible types the calculator persists (flags, numbers, entry
//! text, and an explicit null for "no pending operator").

use serde::{Deserialize, Serialize};

/// A primitive-compatible stored scalar.
///
/// Serializes untagged, so the on-disk JSON reads naturally:
/// `null`, `true`, `12.5`, `"12."`.
///
/// Note that `Null` is a stored value: `store.get(path)` returning
/// `Some(StoredValue::Null)` means "explicitly null", while `None` means the
/// key has never been written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    /// Explicit application-level null (e.g. no pending operator).
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Numeric value.
    Num(f64),
    /// Text value (entry strings, operator ids, published readout text).
    Str(String),
}

impl StoredValue {
    /// Reads the value as a bool, defaulting non-bools to `false`.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Reads the value as a float where that makes sense.
    ///
    /// Strings parse like entry text; null and booleans have no numeric
    /// reading.
    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Str(s) => s.parse::<f64>().ok(),
            Self::Null | Self::Bool(_) => None,
        }
    }

    /// Reads the value as a string slice, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for StoredValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for StoredValue {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<String> for StoredValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for StoredValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_serialization() {
        assert_eq!(serde_json::to_string(&StoredValue::Null).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&StoredValue::Bool(true)).unwrap(),
            "true"
        );
        assert_eq!(serde_json::to_string(&StoredValue::Num(0.5)).unwrap(), "0.5");
        assert_eq!(
            serde_json::to_string(&StoredValue::Str("12.".into())).unwrap(),
            "\"12.\""
        );
    }

    #[test]
    fn untagged_deserialization() {
        assert_eq!(
            serde_json::from_str::<StoredValue>("null").unwrap(),
            StoredValue::Null
        );
        assert_eq!(
            serde_json::from_str::<StoredValue>("\"0.\"").unwrap(),
            StoredValue::Str("0.".into())
        );
    }

    #[test]
    fn numeric_reading_of_strings() {
        assert_eq!(StoredValue::Str("12.".into()).as_num(), Some(12.0));
        assert_eq!(StoredValue::Null.as_num(), None);
    }
}
