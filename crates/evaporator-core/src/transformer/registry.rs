//! Registry mapping transformer metadata to implementations
//!
//! Metadata only says *what* transformation a property declares. The registry
//! decides *how*: it holds one implementation per metadata tag, which keeps
//! declarations independent from behavior and lets tests swap in doubles.
//!
//! Copyright (c) 2025 Evaporator Team
//! Licensed under the Apache-2.0 license

use super::built_in::{EncryptedTransformer, EnumCodecTransformer, UuidCodecTransformer};
use super::context::ResolveContext;
use super::types::{
    ColumnResolver, Direction, ParameterResolver, Resolution, Transformer, TransformerMetadata,
};
use crate::secrets::SecretStore;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Transformer implementations keyed by metadata tag
#[derive(Clone, Default)]
pub struct TransformerRegistry {
    transformers: HashMap<String, Arc<dyn Transformer>>,
}

impl TransformerRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in transformers
    pub fn with_defaults(secrets: Arc<dyn SecretStore>) -> Self {
        Self::new()
            .register(
                TransformerMetadata::ENCRYPTED,
                Arc::new(EncryptedTransformer::new(secrets)),
            )
            .register(TransformerMetadata::ENUM, Arc::new(EnumCodecTransformer))
            .register(TransformerMetadata::UUID, Arc::new(UuidCodecTransformer))
    }

    /// Register an implementation, replacing any earlier one for `tag`
    pub fn register(mut self, tag: impl Into<String>, transformer: Arc<dyn Transformer>) -> Self {
        self.insert(tag, transformer);
        self
    }

    pub fn insert(&mut self, tag: impl Into<String>, transformer: Arc<dyn Transformer>) {
        let tag = tag.into();
        tracing::trace!(tag = %tag, transformer = transformer.name(), "registered transformer");
        self.transformers.insert(tag, transformer);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.transformers.contains_key(tag)
    }

    /// Number of registered tags
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// The object → record resolver for `metadata`
    pub fn column_resolver_for(&self, metadata: &TransformerMetadata) -> Result<&dyn ColumnResolver> {
        let transformer = self.lookup(metadata, Direction::ToRecord)?;
        transformer
            .as_column_resolver()
            .ok_or_else(|| Self::missing_capability(metadata, transformer, Direction::ToRecord))
    }

    /// The record → object resolver for `metadata`
    pub fn parameter_resolver_for(
        &self,
        metadata: &TransformerMetadata,
    ) -> Result<&dyn ParameterResolver> {
        let transformer = self.lookup(metadata, Direction::FromRecord)?;
        transformer
            .as_parameter_resolver()
            .ok_or_else(|| Self::missing_capability(metadata, transformer, Direction::FromRecord))
    }

    /// Run the resolver matching the context's direction
    pub fn resolve(
        &self,
        metadata: &TransformerMetadata,
        context: &ResolveContext<'_>,
    ) -> Result<Resolution> {
        match context.direction() {
            Direction::ToRecord => self.column_resolver_for(metadata)?.column_value(metadata, context),
            Direction::FromRecord => self
                .parameter_resolver_for(metadata)?
                .parameter_value(metadata, context),
        }
    }

    fn lookup(&self, metadata: &TransformerMetadata, direction: Direction) -> Result<&dyn Transformer> {
        self.transformers
            .get(metadata.tag())
            .map(|t| &**t)
            .ok_or_else(|| Error::UnresolvableTransformer {
                tag: metadata.tag().to_string(),
                direction,
                message: "no transformer registered".to_string(),
            })
    }

    fn missing_capability(
        metadata: &TransformerMetadata,
        transformer: &dyn Transformer,
        direction: Direction,
    ) -> Error {
        let capability = match direction {
            Direction::ToRecord => "ColumnResolver",
            Direction::FromRecord => "ParameterResolver",
        };
        Error::UnresolvableTransformer {
            tag: metadata.tag().to_string(),
            direction,
            message: format!("transformer \"{}\" must implement {}", transformer.name(), capability),
        }
    }
}

impl std::fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<_> = self.transformers.keys().collect();
        tags.sort();
        f.debug_struct("TransformerRegistry").field("tags", &tags).finish()
    }
}
