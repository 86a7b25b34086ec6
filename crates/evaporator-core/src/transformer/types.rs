//! Core types for the property transformer system
//!
//! This module defines the direction of travel, the resolution outcome,
//! transformer metadata declared on properties, and the capability traits a
//! transformer implements for each direction.
//!
//! Copyright (c) 2025 Evaporator Team
//! Licensed under the Apache-2.0 license

use super::context::ResolveContext;
use crate::crypto::{CipherKind, CryptConfig, KdfAlgorithm};
use crate::enums::{EnumDescriptor, NamedEnum};
use crate::path::InfoPath;
use crate::{Error, Result, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of travel through the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Object property → record field
    ToRecord,
    /// Record field → object property
    FromRecord,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToRecord => write!(f, "object -> record"),
            Direction::FromRecord => write!(f, "record -> object"),
        }
    }
}

/// Outcome of resolving a property value
///
/// `Resolved(Value::Null)` is a resolved null. `Unresolved` means nothing was
/// produced and the property is left out.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Value),
    Unresolved,
}

impl Resolution {
    pub fn resolved(value: impl Into<Value>) -> Self {
        Resolution::Resolved(value.into())
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    /// The resolved value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::Unresolved => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::Unresolved => None,
        }
    }
}

impl From<Option<Value>> for Resolution {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Resolution::Unresolved, Resolution::Resolved)
    }
}

/// Static configuration of the encryption transformer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncryptedConfig {
    /// Derive the key from a password rather than using key material
    pub password_based: bool,
    /// Secret store name holding the key or password
    pub secret: String,
    /// Associated data location on each side
    pub info_path: InfoPath,
    pub crypt: CryptConfig,
}

impl EncryptedConfig {
    /// Key-material mode
    pub fn key_based(secret: impl Into<String>) -> Self {
        Self {
            password_based: false,
            secret: secret.into(),
            info_path: InfoPath::None,
            crypt: CryptConfig::default(),
        }
    }

    /// Password mode
    pub fn password_based(secret: impl Into<String>) -> Self {
        Self {
            password_based: true,
            ..Self::key_based(secret)
        }
    }

    pub fn with_info_path(mut self, info_path: InfoPath) -> Self {
        self.info_path = info_path;
        self
    }

    pub fn with_cipher(mut self, cipher: CipherKind) -> Self {
        self.crypt.cipher = cipher;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.crypt.iterations = iterations;
        self
    }

    pub fn with_kdf(mut self, kdf: KdfAlgorithm) -> Self {
        self.crypt.kdf = kdf;
        self
    }

    pub fn with_auth_key_info(mut self, info: impl Into<String>) -> Self {
        self.crypt.auth_key_info = info.into();
        self
    }
}

/// Persisted representation of a UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UuidFormat {
    /// 16 raw bytes
    Bytes,
    /// Unsigned 128-bit integer
    Integer,
    /// Hyphenated lowercase text
    String,
}

/// A transformation declared on a property, with its static configuration
#[derive(Debug, Clone, PartialEq)]
pub enum TransformerMetadata {
    /// Authenticated encryption of text values
    Encrypted(EncryptedConfig),
    /// Enum member ↔ member name
    EnumCodec { descriptor: &'static EnumDescriptor },
    /// UUID ↔ bytes, integer or text
    UuidCodec { format: UuidFormat },
    /// A transformer registered under a caller-chosen tag
    Custom {
        tag: String,
        params: serde_json::Value,
    },
}

impl TransformerMetadata {
    pub const ENCRYPTED: &'static str = "encrypted";
    pub const ENUM: &'static str = "enum";
    pub const UUID: &'static str = "uuid";

    /// Registry key for this metadata
    pub fn tag(&self) -> &str {
        match self {
            TransformerMetadata::Encrypted(_) => Self::ENCRYPTED,
            TransformerMetadata::EnumCodec { .. } => Self::ENUM,
            TransformerMetadata::UuidCodec { .. } => Self::UUID,
            TransformerMetadata::Custom { tag, .. } => tag,
        }
    }

    pub fn enum_codec<E: NamedEnum>() -> Self {
        TransformerMetadata::EnumCodec {
            descriptor: E::DESCRIPTOR,
        }
    }

    pub fn uuid(format: UuidFormat) -> Self {
        TransformerMetadata::UuidCodec { format }
    }

    pub fn custom(tag: impl Into<String>) -> Self {
        Self::custom_with(tag, serde_json::Value::Null)
    }

    pub fn custom_with(tag: impl Into<String>, params: serde_json::Value) -> Self {
        TransformerMetadata::Custom {
            tag: tag.into(),
            params,
        }
    }

    /// Error for a transformer handed metadata it does not understand
    pub(crate) fn unexpected(&self, expected: &str, direction: Direction) -> Error {
        Error::UnresolvableTransformer {
            tag: self.tag().to_string(),
            direction,
            message: format!("expected {expected} metadata"),
        }
    }
}

impl From<EncryptedConfig> for TransformerMetadata {
    fn from(config: EncryptedConfig) -> Self {
        TransformerMetadata::Encrypted(config)
    }
}

/// Object → record capability
pub trait ColumnResolver: Send + Sync {
    /// Produce the record-side value, or decline with [`Resolution::Unresolved`]
    fn column_value(
        &self,
        metadata: &TransformerMetadata,
        context: &ResolveContext<'_>,
    ) -> Result<Resolution>;
}

/// Record → object capability
pub trait ParameterResolver: Send + Sync {
    /// Produce the object-side value, or decline with [`Resolution::Unresolved`]
    fn parameter_value(
        &self,
        metadata: &TransformerMetadata,
        context: &ResolveContext<'_>,
    ) -> Result<Resolution>;
}

/// A registered transformer implementation
///
/// A transformer exposes the capabilities it supports. Asking a transformer
/// for a direction it lacks is a configuration error raised by the registry.
pub trait Transformer: Send + Sync {
    fn name(&self) -> &str;

    fn as_column_resolver(&self) -> Option<&dyn ColumnResolver> {
        None
    }

    fn as_parameter_resolver(&self) -> Option<&dyn ParameterResolver> {
        None
    }
}
