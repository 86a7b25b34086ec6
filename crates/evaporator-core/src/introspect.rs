//! Object introspection
//!
//! Rust has no runtime reflection, so types take part in conversion by
//! implementing two small traits. [`Introspect`] is the read side used by path
//! resolution and by the to-record pass; [`Evaporable`] adds the declared
//! property table and the write side used by the from-record pass.

use crate::{PropertyDescriptor, Result, Value};

/// A member read from an object: a plain value or a nested object
pub enum Member<'a> {
    Value(Value),
    Object(&'a dyn Introspect),
}

impl<'a> Member<'a> {
    pub fn into_value(self) -> Option<Value> {
        match self {
            Member::Value(v) => Some(v),
            Member::Object(_) => None,
        }
    }
}

impl<'a> From<Value> for Member<'a> {
    fn from(value: Value) -> Self {
        Member::Value(value)
    }
}

/// Read access to an object's fields and getters
pub trait Introspect {
    /// Name of the concrete type, for diagnostics
    fn type_name(&self) -> &'static str;

    /// Read a field directly by name
    fn field(&self, name: &str) -> Option<Member<'_>>;

    /// Call a getter such as `getEmail`
    ///
    /// Consulted only when [`Introspect::field`] has no member of that name.
    fn call_getter(&self, _name: &str) -> Option<Member<'_>> {
        None
    }
}

/// A type with declared, transformable properties
pub trait Evaporable: Introspect + 'static {
    /// Property declarations in declaration order
    ///
    /// Called at most once per type per [`DescriptorCache`](crate::DescriptorCache).
    fn declare() -> Vec<PropertyDescriptor>;

    /// Write a resolved value back into the named property
    fn set_value(&mut self, property: &str, value: Value) -> Result<()>;
}
