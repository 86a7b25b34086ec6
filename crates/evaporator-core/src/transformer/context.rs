//! Resolve context handed to each transformer
//!
//! Copyright (c) 2025 Evaporator Team
//! Licensed under the Apache-2.0 license

use super::types::{Direction, Resolution};
use crate::config::UnknownEnumPolicy;
use crate::path::{InfoPath, PathResolver};
use crate::{Error, Evaporator, Introspect, PropertyDescriptor, Record, Result, Value};

/// What the pipeline is reading from
#[derive(Clone, Copy)]
pub enum Source<'a> {
    /// An object, when producing a record
    Object(&'a dyn Introspect),
    /// A record, when hydrating an object
    Record(&'a Record),
}

impl<'a> Source<'a> {
    pub fn direction(&self) -> Direction {
        match self {
            Source::Object(_) => Direction::ToRecord,
            Source::Record(_) => Direction::FromRecord,
        }
    }

    /// Initial resolution for the chain: the raw value under `key`
    ///
    /// For objects `key` is the property name, for records the field name. A
    /// key that cannot be read, or names a nested object, seeds `Unresolved`.
    pub fn seed(&self, key: &str) -> Resolution {
        match self {
            Source::Object(object) => object.field(key).and_then(|m| m.into_value()).into(),
            Source::Record(record) => record.get(key).cloned().into(),
        }
    }
}

/// Data available to a transformer while it resolves one property
///
/// Borrowed for the duration of a single transformer call.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    property: &'a PropertyDescriptor,
    resolution: &'a Resolution,
    source: Source<'a>,
    evaporator: Option<&'a Evaporator>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        property: &'a PropertyDescriptor,
        resolution: &'a Resolution,
        source: Source<'a>,
        evaporator: Option<&'a Evaporator>,
    ) -> Self {
        Self {
            property,
            resolution,
            source,
            evaporator,
        }
    }

    /// The property being resolved
    pub fn property(&self) -> &'a PropertyDescriptor {
        self.property
    }

    /// Whether a value has been resolved so far
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_resolved()
    }

    /// The value resolved so far; `None` when unresolved
    ///
    /// A resolved null is `Some(&Value::Null)`.
    pub fn resolved_value(&self) -> Option<&'a Value> {
        self.resolution.value()
    }

    pub fn resolution(&self) -> &'a Resolution {
        self.resolution
    }

    pub fn source(&self) -> Source<'a> {
        self.source
    }

    pub fn direction(&self) -> Direction {
        self.source.direction()
    }

    /// The object being evaporated, when producing a record
    pub fn object(&self) -> Option<&'a dyn Introspect> {
        match self.source {
            Source::Object(object) => Some(object),
            Source::Record(_) => None,
        }
    }

    /// The record being read, when hydrating an object
    pub fn record(&self) -> Option<&'a Record> {
        match self.source {
            Source::Record(record) => Some(record),
            Source::Object(_) => None,
        }
    }

    /// The evaporator driving this conversion
    pub fn evaporator(&self) -> Result<&'a Evaporator> {
        self.evaporator.ok_or_else(|| Error::MissingEvaporatorContext {
            property: self.property.name().to_string(),
        })
    }

    pub fn unknown_enum_policy(&self) -> UnknownEnumPolicy {
        self.evaporator
            .map(|evaporator| evaporator.config().unknown_enum)
            .unwrap_or_default()
    }

    /// Resolve associated data against whichever side is the source
    pub fn resolve_info(&self, info_path: &InfoPath) -> Result<String> {
        let value = match self.source {
            Source::Object(object) => match info_path.object_path() {
                Some(path) => PathResolver::resolve_object(path, object)?,
                None => return Ok(String::new()),
            },
            Source::Record(record) => match info_path.record_key() {
                Some(key) => PathResolver::resolve_record(&key, record)?,
                None => return Ok(String::new()),
            },
        };
        value
            .to_text()
            .map_err(|_| Error::invalid_value(self.property.name(), "text associated data", &value))
    }
}
