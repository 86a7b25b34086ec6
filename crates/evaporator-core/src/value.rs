//! Dynamic values carried through the conversion pipeline

use crate::enums::EnumCase;
use crate::{Error, Result};
use std::fmt;
use uuid::Uuid;

/// A property or record value
///
/// `Value::Null` is a real value. "No value produced" is expressed one level up
/// by [`Resolution::Unresolved`](crate::Resolution::Unresolved), never by `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt128(u128),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Enum(EnumCase),
}

/// Shape of a [`Value`], used for declared property types and error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    UInt128,
    Float,
    String,
    Bytes,
    Uuid,
    Enum,
}

impl Value {
    /// The shape of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::UInt128(_) => ValueKind::UInt128,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::Enum(_) => ValueKind::Enum,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text that is present and not empty
    pub fn as_non_empty_str(&self) -> Option<&str> {
        self.as_str().filter(|s| !s.is_empty())
    }

    pub fn as_enum(&self) -> Option<&EnumCase> {
        match self {
            Value::Enum(case) => Some(case),
            _ => None,
        }
    }

    /// Coerce to text for use as associated data
    ///
    /// `Null` becomes the empty string. Raw bytes have no canonical text form
    /// and are rejected.
    pub fn to_text(&self) -> Result<String> {
        match self {
            Value::Null => Ok(String::new()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Int(n) => Ok(n.to_string()),
            Value::UInt128(n) => Ok(n.to_string()),
            Value::Float(n) => Ok(n.to_string()),
            Value::String(s) => Ok(s.clone()),
            Value::Uuid(u) => Ok(u.hyphenated().to_string()),
            Value::Enum(case) => Ok(case.name.to_string()),
            Value::Bytes(_) => Err(Error::invalid_value("<text>", "text", self)),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::UInt128 => "u128",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::Uuid => "uuid",
            ValueKind::Enum => "enum",
        };
        f.write_str(name)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_a_value() {
        let v: Value = Option::<String>::None.into();
        assert!(v.is_null());
        assert_eq!(v.to_text().unwrap(), "");
    }

    #[test]
    fn test_non_empty_str() {
        assert_eq!(Value::from("a").as_non_empty_str(), Some("a"));
        assert_eq!(Value::from("").as_non_empty_str(), None);
        assert_eq!(Value::Int(1).as_non_empty_str(), None);
    }

    #[test]
    fn test_to_text_rejects_bytes() {
        assert!(Value::Bytes(vec![1, 2]).to_text().is_err());
        assert_eq!(Value::Int(42).to_text().unwrap(), "42");
        assert_eq!(Value::Bool(true).to_text().unwrap(), "true");
    }
}
