//! Open-ended metadata attached to samples and experiments
//!
//! Metadata is a string-keyed mapping of scalar values. The value side is a
//! tagged union rather than raw JSON so callers cannot smuggle nested
//! structures into what is meant to be a flat key/value annotation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A scalar metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Boolean flag
    Flag(bool),
    /// Numeric measurement (concentration, volume, pH, ...)
    Number(f64),
    /// Free-text annotation
    Text(String),
}

/// Flat metadata mapping with deterministic iteration order.
pub type Metadata = BTreeMap<String, MetadataValue>;

impl MetadataValue {
    /// Numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetadataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean value, if this is a flag.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            MetadataValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Flag(b) => write!(f, "{}", b),
            MetadataValue::Number(n) => write!(f, "{}", n),
            MetadataValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for MetadataValue {
    fn from(n: f64) -> Self {
        MetadataValue::Number(n)
    }
}

impl From<i64> for MetadataValue {
    fn from(n: i64) -> Self {
        MetadataValue::Number(n as f64)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        MetadataValue::Flag(b)
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::Text(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_variant() {
        assert_eq!(MetadataValue::Number(7.4).as_number(), Some(7.4));
        assert_eq!(MetadataValue::Number(7.4).as_text(), None);
        assert_eq!(MetadataValue::Text("QC pass".into()).as_text(), Some("QC pass"));
        assert_eq!(MetadataValue::Flag(true).as_flag(), Some(true));
    }

    #[test]
    fn test_serde_untagged_roundtrip() {
        let mut meta = Metadata::new();
        meta.insert("ph".to_string(), 7.2.into());
        meta.insert("verified".to_string(), true.into());
        meta.insert("operator".to_string(), "jdoe".into());

        let json = serde_json::to_string(&meta).unwrap();
        let back: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }

    #[test]
    fn test_serde_scalar_shapes() {
        let json = serde_json::to_string(&MetadataValue::Number(42.0)).unwrap();
        assert_eq!(json, "42.0");
        let json = serde_json::to_string(&MetadataValue::Flag(false)).unwrap();
        assert_eq!(json, "false");
    }
}
