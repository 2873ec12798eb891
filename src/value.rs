//! Value model shared by all metadata domains
//!
//! Raw tag maps come out of the low-level decoders, normalized canonical
//! records go into the per-extraction collection. Both are ordered maps from
//! field name to [`MetaValue`], so one value enum covers the whole pipeline.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// A single metadata value, raw or normalized.
///
/// Timestamps come in two flavors: [`MetaValue::DateTime`] for values without
/// a known UTC offset and [`MetaValue::DateTimeTz`] once an offset fragment
/// has been fused in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bytes(Vec<u8>),
    List(Vec<MetaValue>),
    DateTime(NaiveDateTime),
    DateTimeTz(DateTime<FixedOffset>),
}

impl MetaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value. Integers widen to float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Float(f) => Some(*f),
            MetaValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetaValue::Integer(i) => Some(*i),
            MetaValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            MetaValue::Bytes(b) => Some(b),
            // ASCII-typed tags carry the same payload as text
            MetaValue::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Text(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Text(s)
    }
}

impl From<i64> for MetaValue {
    fn from(i: i64) -> Self {
        MetaValue::Integer(i)
    }
}

impl From<f64> for MetaValue {
    fn from(f: f64) -> Self {
        MetaValue::Float(f)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(items: Vec<String>) -> Self {
        MetaValue::List(items.into_iter().map(MetaValue::Text).collect())
    }
}

/// Raw tag map as supplied by a low-level decoder.
///
/// Never mutated in place by an extractor; each normalization pass derives a
/// fresh [`CanonicalRecord`] from it.
pub type RawTagMap = BTreeMap<String, MetaValue>;

/// Normalized, typed record for one metadata domain (exif, iptc, asset).
///
/// The accessors are total: a field that is absent (or of the wrong type)
/// yields the documented default instead of failing, so consumer code never
/// has to branch on presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CanonicalRecord {
    fields: BTreeMap<String, MetaValue>,
}

impl CanonicalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<MetaValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<MetaValue> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&MetaValue> {
        self.fields.get(name)
    }

    /// Text field; absent or non-text yields `""`.
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).and_then(MetaValue::as_str).unwrap_or("")
    }

    /// Float field; absent or non-numeric yields `0.0`.
    pub fn float(&self, name: &str) -> f64 {
        self.fields.get(name).and_then(MetaValue::as_f64).unwrap_or(0.0)
    }

    /// Integer field; absent or non-numeric yields `0`.
    pub fn integer(&self, name: &str) -> i64 {
        self.fields.get(name).and_then(MetaValue::as_i64).unwrap_or(0)
    }

    /// List field; absent or scalar yields an empty slice.
    pub fn list(&self, name: &str) -> &[MetaValue] {
        self.fields.get(name).and_then(MetaValue::as_list).unwrap_or(&[])
    }

    /// List field flattened to strings; non-text entries are skipped.
    pub fn texts(&self, name: &str) -> Vec<&str> {
        self.list(name).iter().filter_map(MetaValue::as_str).collect()
    }

    /// Timestamp field without offset information, if present and valid.
    pub fn timestamp(&self, name: &str) -> Option<NaiveDateTime> {
        match self.fields.get(name)? {
            MetaValue::DateTime(dt) => Some(*dt),
            MetaValue::DateTimeTz(dt) => Some(dt.naive_local()),
            _ => None,
        }
    }

    /// Timestamp field with a fused UTC offset, if present.
    pub fn timestamp_tz(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        match self.fields.get(name)? {
            MetaValue::DateTimeTz(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, MetaValue)> for CanonicalRecord {
    fn from_iter<T: IntoIterator<Item = (String, MetaValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// One record per metadata domain, built fresh per extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetaDataCollection {
    records: BTreeMap<String, CanonicalRecord>,
}

impl MetaDataCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the record for a domain. A later extractor targeting the same
    /// domain key overwrites an earlier one (last write wins).
    pub fn set(&mut self, domain: impl Into<String>, record: CanonicalRecord) {
        self.records.insert(domain.into(), record);
    }

    pub fn get(&self, domain: &str) -> Option<&CanonicalRecord> {
        self.records.get(domain)
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CanonicalRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
