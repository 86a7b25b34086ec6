//! Dot-path resolution against object graphs and flat records
//!
//! Object graphs are walked one segment at a time. Each segment is looked up
//! as a field first and as a `get<Segment>` getter second. Records are flat,
//! so a path on the record side is always a single key.

use crate::{Error, Introspect, Member, Record, Result, Value};
use std::fmt;

/// A parsed `.`-separated property path; may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DotPath {
    segments: Vec<String>,
}

impl DotPath {
    /// Parse a dotted path
    ///
    /// The empty string is the empty path. Empty segments are rejected.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Ok(Self::default());
        }

        let segments = path
            .split('.')
            .map(|segment| {
                if segment.is_empty() {
                    Err(Error::InvalidPath {
                        path: path.to_string(),
                        segment: String::new(),
                    })
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { segments })
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Where a transformer finds its associated data on each side of the mapping
///
/// Both sides must resolve to the same text for decryption to authenticate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum InfoPath {
    /// No associated data; resolves to the empty string
    #[default]
    None,
    /// Same path on both sides; the record side uses the dotted text as one key
    Shared(DotPath),
    /// Object path and record key differ
    Split { object: DotPath, record: String },
}

impl InfoPath {
    /// Same path on both sides
    pub fn shared(path: &str) -> Result<Self> {
        let path = DotPath::parse(path)?;
        if path.is_empty() {
            Ok(InfoPath::None)
        } else {
            Ok(InfoPath::Shared(path))
        }
    }

    /// Object path and record key pair
    pub fn split(object: &str, record: impl Into<String>) -> Result<Self> {
        Ok(InfoPath::Split {
            object: DotPath::parse(object)?,
            record: record.into(),
        })
    }

    /// Path used against the object graph
    pub fn object_path(&self) -> Option<&DotPath> {
        match self {
            InfoPath::None => None,
            InfoPath::Shared(path) => Some(path),
            InfoPath::Split { object, .. } => Some(object),
        }
    }

    /// Key used against a flat record
    pub fn record_key(&self) -> Option<String> {
        match self {
            InfoPath::None => None,
            InfoPath::Shared(path) => Some(path.to_string()),
            InfoPath::Split { record, .. } => Some(record.clone()),
        }
    }
}

/// Resolves paths to values
pub struct PathResolver;

impl PathResolver {
    /// Walk `path` through an object graph
    pub fn resolve_object(path: &DotPath, root: &dyn Introspect) -> Result<Value> {
        let Some((last, parents)) = path.segments.split_last() else {
            return Ok(Value::String(String::new()));
        };
        let invalid = |segment: &str| Error::InvalidPath {
            path: path.to_string(),
            segment: segment.to_string(),
        };

        let mut node = root;
        for segment in parents {
            match Self::lookup(node, segment) {
                Some(Member::Object(child)) => node = child,
                _ => return Err(invalid(segment)),
            }
        }

        match Self::lookup(node, last) {
            Some(Member::Value(value)) => Ok(value),
            _ => Err(invalid(last)),
        }
    }

    /// Look `key` up in a flat record
    pub fn resolve_record(key: &str, record: &Record) -> Result<Value> {
        if key.is_empty() {
            return Ok(Value::String(String::new()));
        }

        record.get(key).cloned().ok_or_else(|| Error::InvalidPath {
            path: key.to_string(),
            segment: key.to_string(),
        })
    }

    /// Getter name for a segment: `email` → `getEmail`
    pub fn getter_name(segment: &str) -> String {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
            None => "get".to_string(),
        }
    }

    fn lookup<'a>(node: &'a dyn Introspect, segment: &str) -> Option<Member<'a>> {
        node.field(segment)
            .or_else(|| node.call_getter(&Self::getter_name(segment)))
    }
}
