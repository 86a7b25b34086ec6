//! Flat persisted records and the caller-declared property → field mapping

use crate::Value;
use std::collections::{BTreeMap, HashMap};

/// A flat field → value mapping, as read from or written to storage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.fields
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Association between object property names and record field names
///
/// Supplied per call, never persisted. Keys are unique; order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    fields: HashMap<String, String>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map each property to a field of the same name
    pub fn identity<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: properties
                .into_iter()
                .map(|p| {
                    let p = p.into();
                    (p.clone(), p)
                })
                .collect(),
        }
    }

    /// Add a property → field association, replacing any earlier one
    pub fn map(mut self, property: impl Into<String>, field: impl Into<String>) -> Self {
        self.fields.insert(property.into(), field.into());
        self
    }

    /// Record field for a property, if mapped
    pub fn field_for(&self, property: &str) -> Option<&str> {
        self.fields.get(property).map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<P: Into<String>, F: Into<String>> FromIterator<(P, F)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (P, F)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(p, f)| (p.into(), f.into()))
                .collect(),
        }
    }
}
