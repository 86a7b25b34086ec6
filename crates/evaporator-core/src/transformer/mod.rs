//! Transformer pipeline for per-property value conversion
//!
//! A property declares an ordered list of [`TransformerMetadata`]. During
//! conversion the [`ColumnAttributesHandler`] looks each one up in the
//! [`TransformerRegistry`] and folds the results: a resolved value feeds the
//! next transformer, a decline leaves the running value unchanged.
//!
//! Copyright (c) 2025 Evaporator Team
//! Licensed under the Apache-2.0 license

pub mod built_in;
pub mod context;
pub mod handler;
pub mod registry;
pub mod types;


pub use built_in::{EncryptedTransformer, EnumCodecTransformer, UuidCodecTransformer};
pub use context::{ResolveContext, Source};
pub use handler::ColumnAttributesHandler;
pub use registry::TransformerRegistry;
pub use types::{
    ColumnResolver, Direction, EncryptedConfig, ParameterResolver, Resolution, Transformer,
    TransformerMetadata, UuidFormat,
};
