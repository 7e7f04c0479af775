//! Record model: one extracted entity as a named-field mapping

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single named datum inside a record.
///
/// Absence of a field is expressed by the field not being present in the
/// record at all, never by an empty string or an empty list. That keeps the
/// distinction between "unset" and "deliberately empty" intact until
/// projection decides what a missing value becomes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean field (e.g. `prescription_required`)
    Flag(bool),
    /// Free-text field (e.g. `generic_name`)
    Text(String),
    /// Ordered list of strings (e.g. `brand_names`)
    List(Vec<String>),
}

/// One extracted logical entity (e.g. a single medicine) as a mapping from
/// field name to value.
///
/// Records carry no identity beyond their field values; a record without a
/// non-empty `name` field has no primary key and is discarded by the
/// extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Record {
    #[serde(flatten)]
    pub fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// The record's `name` field, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        match self.fields.get("name") {
            Some(FieldValue::Text(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
