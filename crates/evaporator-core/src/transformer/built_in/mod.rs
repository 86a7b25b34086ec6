//! Built-in transformers
//!
//! This module provides the transformers registered by
//! [`TransformerRegistry::with_defaults`](super::TransformerRegistry::with_defaults).
//!
//! Copyright (c) 2025 Evaporator Team
//! Licensed under the Apache-2.0 license

mod encrypted;
mod enum_codec;
mod uuid_codec;

pub use encrypted::EncryptedTransformer;
pub use enum_codec::EnumCodecTransformer;
pub use uuid_codec::UuidCodecTransformer;
