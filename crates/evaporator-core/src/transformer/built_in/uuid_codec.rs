//! UUID format transformer
//!
//! Copyright (c) 2025 Evaporator Team
//! Licensed under the Apache-2.0 license

use super::super::context::ResolveContext;
use super::super::types::{
    ColumnResolver, ParameterResolver, Resolution, Transformer, TransformerMetadata, UuidFormat,
};
use crate::{Error, Result, Value};
use uuid::Uuid;

/// Stores UUIDs as raw bytes, a 128-bit integer or hyphenated text
///
/// Reading accepts any of the three representations regardless of the
/// declared format. The nil UUID and non-UUID values are declined.
pub struct UuidCodecTransformer;

impl UuidCodecTransformer {
    fn format(metadata: &TransformerMetadata, context: &ResolveContext<'_>) -> Result<UuidFormat> {
        match metadata {
            TransformerMetadata::UuidCodec { format } => Ok(*format),
            other => Err(other.unexpected("UuidCodec", context.direction())),
        }
    }
}

impl Transformer for UuidCodecTransformer {
    fn name(&self) -> &str {
        "UuidCodec"
    }

    fn as_column_resolver(&self) -> Option<&dyn ColumnResolver> {
        Some(self)
    }

    fn as_parameter_resolver(&self) -> Option<&dyn ParameterResolver> {
        Some(self)
    }
}

impl ColumnResolver for UuidCodecTransformer {
    fn column_value(
        &self,
        metadata: &TransformerMetadata,
        context: &ResolveContext<'_>,
    ) -> Result<Resolution> {
        let format = Self::format(metadata, context)?;
        let uuid = match context.resolved_value() {
            Some(Value::Uuid(uuid)) if !uuid.is_nil() => uuid,
            _ => return Ok(Resolution::Unresolved),
        };

        let value = match format {
            UuidFormat::Bytes => Value::Bytes(uuid.as_bytes().to_vec()),
            UuidFormat::Integer => Value::UInt128(uuid.as_u128()),
            UuidFormat::String => Value::String(uuid.hyphenated().to_string()),
        };
        Ok(Resolution::Resolved(value))
    }
}

impl ParameterResolver for UuidCodecTransformer {
    fn parameter_value(
        &self,
        metadata: &TransformerMetadata,
        context: &ResolveContext<'_>,
    ) -> Result<Resolution> {
        Self::format(metadata, context)?;
        let property = context.property().name();

        let uuid = match context.resolved_value() {
            Some(Value::Bytes(bytes)) if !bytes.is_empty() => Uuid::from_slice(bytes)
                .map_err(|_| Error::InvalidValue {
                    property: property.to_string(),
                    expected: "16 UUID bytes".to_string(),
                    found: format!("{} bytes", bytes.len()),
                })?,
            Some(Value::UInt128(n)) => Uuid::from_u128(*n),
            Some(Value::String(text)) if !text.is_empty() => {
                Uuid::parse_str(text).map_err(|_| Error::InvalidValue {
                    property: property.to_string(),
                    expected: "UUID text".to_string(),
                    found: format!("\"{text}\""),
                })?
            }
            _ => return Ok(Resolution::Unresolved),
        };

        if uuid.is_nil() {
            return Ok(Resolution::Unresolved);
        }
        Ok(Resolution::Resolved(Value::Uuid(uuid)))
    }
}
