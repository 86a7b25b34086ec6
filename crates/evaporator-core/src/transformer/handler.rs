//! Per-property transformer chain
//!
//! This module folds a property's declared transformers over its running
//! resolution. A transformer that returns a value replaces the running
//! resolution and feeds the next one; a transformer that declines leaves it
//! untouched. If every declared transformer declines, the property is
//! unresolved. Errors abort the chain and propagate unchanged.
//!
//! Copyright (c) 2025 Evaporator Team
//! Licensed under the Apache-2.0 license

use super::context::{ResolveContext, Source};
use super::registry::TransformerRegistry;
use super::types::{Direction, Resolution, TransformerMetadata};
use crate::config::ChainOrder;
use crate::{Evaporator, PropertyDescriptor, Result};
use std::sync::Arc;

/// Runs the declared transformer chain for one property at a time
#[derive(Debug, Clone)]
pub struct ColumnAttributesHandler {
    registry: Arc<TransformerRegistry>,
    reverse_chain: ChainOrder,
}

impl ColumnAttributesHandler {
    pub fn new(registry: Arc<TransformerRegistry>) -> Self {
        Self {
            registry,
            reverse_chain: ChainOrder::default(),
        }
    }

    /// Order used for the record → object pass
    pub fn with_reverse_chain(mut self, order: ChainOrder) -> Self {
        self.reverse_chain = order;
        self
    }

    pub fn registry(&self) -> &TransformerRegistry {
        &self.registry
    }

    /// Resolve one property
    ///
    /// `seed` is the raw value read from `source` and is returned as-is for a
    /// property without transformers. `evaporator` is exposed to transformers
    /// through [`ResolveContext::evaporator`].
    pub fn handle(
        &self,
        source: Source<'_>,
        descriptor: &PropertyDescriptor,
        seed: Resolution,
        evaporator: Option<&Evaporator>,
    ) -> Result<Resolution> {
        let direction = source.direction();
        let mirrored = direction == Direction::FromRecord && self.reverse_chain == ChainOrder::Mirrored;

        let mut chain: Vec<&TransformerMetadata> = descriptor.transformers().iter().collect();
        if mirrored {
            chain.reverse();
        }

        if chain.is_empty() {
            return Ok(seed);
        }

        let mut resolution = seed;
        let mut contributed = false;
        for metadata in chain {
            let context = ResolveContext::new(descriptor, &resolution, source, evaporator);
            let attempt = self.registry.resolve(metadata, &context)?;
            Self::trace(descriptor, metadata, direction, &attempt);

            if attempt.is_resolved() {
                resolution = attempt;
                contributed = true;
            }
        }

        if contributed {
            Ok(resolution)
        } else {
            Ok(Resolution::Unresolved)
        }
    }

    fn trace(
        descriptor: &PropertyDescriptor,
        metadata: &TransformerMetadata,
        direction: Direction,
        attempt: &Resolution,
    ) {
        tracing::trace!(
            property = descriptor.name(),
            transformer = metadata.tag(),
            direction = %direction,
            resolved = attempt.is_resolved(),
            "transformer applied"
        );
    }
}
