//! Enum ↔ member name transformer
//!
//! Copyright (c) 2025 Evaporator Team
//! Licensed under the Apache-2.0 license

use super::super::context::ResolveContext;
use super::super::types::{
    ColumnResolver, ParameterResolver, Resolution, Transformer, TransformerMetadata,
};
use crate::config::UnknownEnumPolicy;
use crate::enums::EnumDescriptor;
use crate::{Error, Result, Value};

/// Writes enum members as their name and reads names back into members
pub struct EnumCodecTransformer;

impl EnumCodecTransformer {
    fn descriptor(
        metadata: &TransformerMetadata,
        context: &ResolveContext<'_>,
    ) -> Result<&'static EnumDescriptor> {
        match metadata {
            TransformerMetadata::EnumCodec { descriptor } => Ok(*descriptor),
            other => Err(other.unexpected("EnumCodec", context.direction())),
        }
    }
}

impl Transformer for EnumCodecTransformer {
    fn name(&self) -> &str {
        "EnumCodec"
    }

    fn as_column_resolver(&self) -> Option<&dyn ColumnResolver> {
        Some(self)
    }

    fn as_parameter_resolver(&self) -> Option<&dyn ParameterResolver> {
        Some(self)
    }
}

impl ColumnResolver for EnumCodecTransformer {
    fn column_value(
        &self,
        metadata: &TransformerMetadata,
        context: &ResolveContext<'_>,
    ) -> Result<Resolution> {
        let descriptor = Self::descriptor(metadata, context)?;

        match context.resolved_value() {
            Some(Value::Enum(case)) if case.enum_name == descriptor.name => {
                Ok(Resolution::resolved(case.name))
            }
            Some(Value::Enum(case)) => Err(Error::InvalidValue {
                property: context.property().name().to_string(),
                expected: descriptor.name.to_string(),
                found: case.enum_name.to_string(),
            }),
            _ => Ok(Resolution::Unresolved),
        }
    }
}

impl ParameterResolver for EnumCodecTransformer {
    fn parameter_value(
        &self,
        metadata: &TransformerMetadata,
        context: &ResolveContext<'_>,
    ) -> Result<Resolution> {
        let descriptor = Self::descriptor(metadata, context)?;
        let Some(name) = context.resolved_value().and_then(Value::as_str) else {
            return Ok(Resolution::Unresolved);
        };

        match descriptor.case(name) {
            Some(case) => Ok(Resolution::Resolved(Value::Enum(case))),
            None => match context.unknown_enum_policy() {
                UnknownEnumPolicy::Decline => {
                    tracing::trace!(
                        property = context.property().name(),
                        enum_name = descriptor.name,
                        "unknown enum case declined"
                    );
                    Ok(Resolution::Unresolved)
                }
                UnknownEnumPolicy::Error => Err(Error::UnknownEnumCase {
                    enum_name: descriptor.name.to_string(),
                    value: name.to_string(),
                }),
            },
        }
    }
}
