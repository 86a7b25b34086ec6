//! Object ↔ record conversion
//!
//! [`Evaporator`] is the entry point. It walks a type's declared properties,
//! runs each mapped property through its transformer chain and assembles the
//! output. Both directions share the same per-property orchestration and differ
//! only in where the seed value comes from and which resolver capability runs.
//!
//! Copyright (c) 2025 Evaporator Team
//! Licensed under the Apache-2.0 license

use crate::config::EvaporatorConfig;
use crate::secrets::{EnvSecretStore, SecretStore};
use crate::transformer::{ColumnAttributesHandler, Source, TransformerRegistry};
use crate::{
    DescriptorCache, Error, Evaporable, FieldMapping, PropertyDescriptor, Record, Result, Value,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Converts [`Evaporable`] objects to flat records and back
#[derive(Debug, Clone)]
pub struct Evaporator {
    registry: Arc<TransformerRegistry>,
    handler: ColumnAttributesHandler,
    cache: Option<Arc<DescriptorCache>>,
    config: EvaporatorConfig,
}

impl Evaporator {
    /// Evaporator over `registry` with default configuration
    pub fn new(registry: TransformerRegistry) -> Self {
        let registry = Arc::new(registry);
        Self {
            handler: ColumnAttributesHandler::new(Arc::clone(&registry)),
            registry,
            cache: None,
            config: EvaporatorConfig::default(),
        }
    }

    /// Evaporator with the built-in transformers reading secrets from `secrets`
    pub fn with_defaults(secrets: Arc<dyn SecretStore>) -> Self {
        Self::new(TransformerRegistry::with_defaults(secrets))
    }

    /// Evaporator with the built-in transformers, environment secrets and the
    /// given configuration
    pub fn from_config(config: EvaporatorConfig) -> Self {
        let secrets = if config.load_dotenv {
            EnvSecretStore::from_dotenv()
        } else {
            EnvSecretStore::new()
        };
        Self::with_defaults(Arc::new(secrets)).with_config(config)
    }

    /// Like [`Evaporator::from_config`], configured from `EVAPORATOR_*` variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(EvaporatorConfig::from_env()?))
    }

    pub fn with_config(mut self, config: EvaporatorConfig) -> Self {
        self.handler = self.handler.with_reverse_chain(config.reverse_chain);
        self.config = config;
        self
    }

    /// Use a private descriptor cache instead of the process-wide one
    pub fn with_cache(mut self, cache: Arc<DescriptorCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &EvaporatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &TransformerRegistry {
        &self.registry
    }

    /// Declared properties of `T`, in declaration order
    pub fn descriptors<T: Evaporable>(&self) -> Arc<[PropertyDescriptor]> {
        match &self.cache {
            Some(cache) => cache.descriptors::<T>(),
            None => DescriptorCache::global().descriptors::<T>(),
        }
    }

    /// Produce a record from `object`
    ///
    /// Only properties named in `mapping` are considered. A property whose
    /// chain ends unresolved is left out of the record entirely. Any error
    /// aborts the call and no record is returned.
    pub fn to_record<T: Evaporable>(&self, object: &T, mapping: &FieldMapping) -> Result<Record> {
        let descriptors = self.descriptors::<T>();
        debug!(
            type_name = object.type_name(),
            mapped = mapping.len(),
            "evaporating object to record"
        );
        self.warn_undeclared(object.type_name(), &descriptors, mapping);

        let source = Source::Object(object);
        let mut record = Record::new();
        for descriptor in descriptors.iter() {
            let Some(field) = mapping.field_for(descriptor.name()) else {
                continue;
            };

            let seed = source.seed(descriptor.name());
            let resolution = self.handler.handle(source, descriptor, seed, Some(self))?;
            if let Some(value) = resolution.into_value() {
                record.insert(field, value);
            }
        }

        Ok(record)
    }

    /// Build a new `T` from `record`
    ///
    /// Properties whose chain ends unresolved keep their `Default` value.
    pub fn from_record<T: Evaporable + Default>(
        &self,
        record: &Record,
        mapping: &FieldMapping,
    ) -> Result<T> {
        let mut object = T::default();
        self.from_record_into(&mut object, record, mapping)?;
        Ok(object)
    }

    /// Populate an existing `object` from `record`
    ///
    /// Every mapped property is resolved and checked against its declared
    /// type before any is written, so a transformer error or a mistyped value
    /// leaves `object` untouched. Null is accepted for any declared type.
    /// Unresolved properties keep their prior value.
    pub fn from_record_into<T: Evaporable>(
        &self,
        object: &mut T,
        record: &Record,
        mapping: &FieldMapping,
    ) -> Result<()> {
        let descriptors = self.descriptors::<T>();
        debug!(
            type_name = object.type_name(),
            fields = record.len(),
            mapped = mapping.len(),
            "hydrating object from record"
        );
        self.warn_undeclared(object.type_name(), &descriptors, mapping);

        let staged = self.resolve_record(record, mapping, &descriptors)?;
        for (property, value) in staged {
            object.set_value(property, value)?;
        }
        Ok(())
    }

    fn resolve_record<'d>(
        &self,
        record: &Record,
        mapping: &FieldMapping,
        descriptors: &'d [PropertyDescriptor],
    ) -> Result<Vec<(&'d str, Value)>> {
        let source = Source::Record(record);
        let mut staged = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let Some(field) = mapping.field_for(descriptor.name()) else {
                continue;
            };

            let seed = source.seed(field);
            let resolution = self.handler.handle(source, descriptor, seed, Some(self))?;
            if let Some(value) = resolution.into_value() {
                if !value.is_null() && value.kind() != descriptor.declared_type() {
                    return Err(Error::invalid_value(
                        descriptor.name(),
                        descriptor.declared_type().to_string(),
                        &value,
                    ));
                }
                staged.push((descriptor.name(), value));
            }
        }

        Ok(staged)
    }

    fn warn_undeclared(
        &self,
        type_name: &str,
        descriptors: &[PropertyDescriptor],
        mapping: &FieldMapping,
    ) {
        for property in mapping.properties() {
            if !descriptors.iter().any(|d| d.name() == property) {
                warn!(type_name, property, "mapping names an undeclared property; ignored");
            }
        }
    }
}
