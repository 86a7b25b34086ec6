//! Evaporator Core - metadata-driven object ↔ record conversion
//!
//! This crate turns in-memory objects into flat field → value records and
//! reconstructs objects from such records. Individual properties can declare
//! transformers (authenticated encryption, enum names, UUID formats, or
//! caller-provided ones) that run during the conversion in either direction.
//!
//! # Main Components
//!
//! - **Introspection**: [`Introspect`] and [`Evaporable`] describe a type's readable members and declared properties
//! - **Transformers**: the [`transformer`] pipeline folds each property's declared chain
//! - **Path resolution**: [`PathResolver`] reads associated data from nested objects or records
//! - **Cryptography**: [`Crypt`] implements key- and password-based AES-GCM
//! - **Error Handling**: one [`Error`] enum built with `thiserror`
//!
//! # Example
//!
//! ```
//! use evaporator_core::{
//!     Evaporable, Evaporator, FieldMapping, Introspect, Member, MemorySecretStore,
//!     PropertyDescriptor, Result, Value, ValueKind,
//! };
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Note {
//!     title: String,
//! }
//!
//! impl Introspect for Note {
//!     fn type_name(&self) -> &'static str {
//!         "Note"
//!     }
//!
//!     fn field(&self, name: &str) -> Option<Member<'_>> {
//!         match name {
//!             "title" => Some(Value::from(self.title.as_str()).into()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl Evaporable for Note {
//!     fn declare() -> Vec<PropertyDescriptor> {
//!         vec![PropertyDescriptor::builder("title", ValueKind::String).build()]
//!     }
//!
//!     fn set_value(&mut self, _property: &str, value: Value) -> Result<()> {
//!         self.title = value.to_text()?;
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let evaporator = Evaporator::with_defaults(Arc::new(MemorySecretStore::new()));
//! let mapping = FieldMapping::new().map("title", "note_title");
//!
//! let record = evaporator.to_record(&Note { title: "hello".into() }, &mapping)?;
//! assert_eq!(record.get("note_title"), Some(&Value::from("hello")));
//!
//! let note: Note = evaporator.from_record(&record, &mapping)?;
//! assert_eq!(note.title, "hello");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crypto;
pub mod descriptor;
pub mod enums;
pub mod error;
pub mod evaporator;
pub mod introspect;
pub mod path;
pub mod record;
pub mod secrets;
pub mod transformer;
pub mod value;

// Re-export main types for convenience
pub use config::{ChainOrder, EvaporatorConfig, UnknownEnumPolicy};
pub use crypto::{CipherKind, Crypt, CryptConfig, KdfAlgorithm};
pub use descriptor::{DescriptorCache, PropertyBuilder, PropertyDescriptor};
pub use enums::{EnumCase, EnumDescriptor, NamedEnum};
pub use error::{Error, Result};
pub use evaporator::Evaporator;
pub use introspect::{Evaporable, Introspect, Member};
pub use path::{DotPath, InfoPath, PathResolver};
pub use record::{FieldMapping, Record};
pub use secrets::{EnvSecretStore, MemorySecretStore, SecretStore};
pub use transformer::{
    Direction, EncryptedConfig, Resolution, ResolveContext, TransformerMetadata,
    TransformerRegistry, UuidFormat,
};
pub use value::{Value, ValueKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
