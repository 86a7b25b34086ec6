//! Property descriptors and the per-type descriptor cache

use crate::transformer::TransformerMetadata;
use crate::{Evaporable, ValueKind};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// One declared property of a type and its ordered transformer declarations
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    name: String,
    declared_type: ValueKind,
    transformers: Vec<TransformerMetadata>,
}

impl PropertyDescriptor {
    /// Start declaring a property
    pub fn builder(name: impl Into<String>, declared_type: ValueKind) -> PropertyBuilder {
        PropertyBuilder::new(name, declared_type)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> ValueKind {
        self.declared_type
    }

    /// Transformer declarations in declaration order
    pub fn transformers(&self) -> &[TransformerMetadata] {
        &self.transformers
    }
}

/// Builder for property declarations
pub struct PropertyBuilder {
    name: String,
    declared_type: ValueKind,
    transformers: Vec<TransformerMetadata>,
}

impl PropertyBuilder {
    pub fn new(name: impl Into<String>, declared_type: ValueKind) -> Self {
        Self {
            name: name.into(),
            declared_type,
            transformers: Vec::new(),
        }
    }

    /// Append a transformer; declaration order is chain order
    pub fn transform(mut self, metadata: impl Into<TransformerMetadata>) -> Self {
        self.transformers.push(metadata.into());
        self
    }

    pub fn build(self) -> PropertyDescriptor {
        PropertyDescriptor {
            name: self.name,
            declared_type: self.declared_type,
            transformers: self.transformers,
        }
    }
}

impl From<PropertyBuilder> for PropertyDescriptor {
    fn from(builder: PropertyBuilder) -> Self {
        builder.build()
    }
}

/// Read-mostly cache of property declarations, keyed by type
///
/// Lookups take a read lock. On a miss the declaration is built without any
/// lock held and published under the write lock; if another thread published
/// first, its table wins and the local one is dropped, so every caller
/// observes the same `Arc`.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    tables: RwLock<HashMap<TypeId, Arc<[PropertyDescriptor]>>>,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache
    pub fn global() -> &'static DescriptorCache {
        static GLOBAL: OnceLock<DescriptorCache> = OnceLock::new();
        GLOBAL.get_or_init(DescriptorCache::new)
    }

    /// Descriptors for `T`, building them on first use
    pub fn descriptors<T: Evaporable>(&self) -> Arc<[PropertyDescriptor]> {
        let key = TypeId::of::<T>();

        if let Some(table) = self.read_table(&key) {
            return table;
        }

        let built: Arc<[PropertyDescriptor]> = T::declare().into();
        let mut tables = self
            .tables
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let table = tables.entry(key).or_insert_with(|| {
            tracing::debug!(
                type_name = std::any::type_name::<T>(),
                properties = built.len(),
                "cached property descriptors"
            );
            built
        });
        Arc::clone(table)
    }

    /// Number of cached types
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_table(&self, key: &TypeId) -> Option<Arc<[PropertyDescriptor]>> {
        self.tables
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}
