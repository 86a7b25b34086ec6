//! Name-addressable enums
//!
//! Enum properties cross the record boundary as their member name. A Rust enum
//! opts in by implementing [`NamedEnum`], usually through the [`named_enum!`]
//! macro, which also publishes a static [`EnumDescriptor`] for declarations.

use crate::Value;

/// Static description of an enum: its name and the names of its members
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub cases: &'static [&'static str],
}

impl EnumDescriptor {
    /// Look up a member by name, returning the case as a [`Value`]-ready form
    pub fn case(&self, name: &str) -> Option<EnumCase> {
        self.cases
            .iter()
            .find(|case| **case == name)
            .map(|case| EnumCase {
                enum_name: self.name,
                name: *case,
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cases.iter().any(|case| *case == name)
    }
}

/// One member of a declared enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumCase {
    pub enum_name: &'static str,
    pub name: &'static str,
}

/// A Rust enum whose members are addressable by name
pub trait NamedEnum: Sized + Copy + 'static {
    /// Descriptor listing every member name
    const DESCRIPTOR: &'static EnumDescriptor;

    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;

    fn to_value(self) -> Value {
        Value::Enum(EnumCase {
            enum_name: Self::DESCRIPTOR.name,
            name: self.name(),
        })
    }

    /// Accept an enum case of this enum
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Enum(case) if case.enum_name == Self::DESCRIPTOR.name => {
                Self::from_name(case.name)
            }
            _ => None,
        }
    }
}

/// Declare a fieldless enum implementing [`NamedEnum`]
///
/// ```
/// use evaporator_core::{named_enum, NamedEnum};
///
/// named_enum! {
///     #[derive(Debug, PartialEq)]
///     pub enum Status { Active, Suspended }
/// }
///
/// assert_eq!(Status::Active.name(), "Active");
/// assert_eq!(Status::from_name("Suspended"), Some(Status::Suspended));
/// assert_eq!(Status::DESCRIPTOR.cases, &["Active", "Suspended"]);
/// ```
#[macro_export]
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($case:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        $vis enum $name { $($case),+ }

        impl $crate::NamedEnum for $name {
            const DESCRIPTOR: &'static $crate::EnumDescriptor = &$crate::EnumDescriptor {
                name: stringify!($name),
                cases: &[$(stringify!($case)),+],
            };

            fn name(self) -> &'static str {
                match self {
                    $($name::$case => stringify!($case)),+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($case) => Some($name::$case),)+
                    _ => None,
                }
            }
        }
    };
}
