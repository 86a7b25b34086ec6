//! Encryption transformer
//!
//! Copyright (c) 2025 Evaporator Team
//! Licensed under the Apache-2.0 license

use super::super::context::ResolveContext;
use super::super::types::{
    ColumnResolver, EncryptedConfig, ParameterResolver, Resolution, Transformer,
    TransformerMetadata,
};
use crate::crypto::Crypt;
use crate::secrets::SecretStore;
use crate::{Error, Result, Value};
use std::sync::Arc;

/// Encrypts text on the way to a record and decrypts it on the way back
///
/// Empty and non-text values are declined in both directions, so "no value"
/// never turns into a fixed ciphertext.
pub struct EncryptedTransformer {
    secrets: Arc<dyn SecretStore>,
}

impl EncryptedTransformer {
    pub fn new(secrets: Arc<dyn SecretStore>) -> Self {
        Self { secrets }
    }

    fn config<'m>(
        metadata: &'m TransformerMetadata,
        context: &ResolveContext<'_>,
    ) -> Result<&'m EncryptedConfig> {
        match metadata {
            TransformerMetadata::Encrypted(config) => Ok(config),
            other => Err(other.unexpected("Encrypted", context.direction())),
        }
    }
}

impl Transformer for EncryptedTransformer {
    fn name(&self) -> &str {
        "Encrypted"
    }

    fn as_column_resolver(&self) -> Option<&dyn ColumnResolver> {
        Some(self)
    }

    fn as_parameter_resolver(&self) -> Option<&dyn ParameterResolver> {
        Some(self)
    }
}

impl ColumnResolver for EncryptedTransformer {
    fn column_value(
        &self,
        metadata: &TransformerMetadata,
        context: &ResolveContext<'_>,
    ) -> Result<Resolution> {
        let config = Self::config(metadata, context)?;
        let Some(plaintext) = context.resolved_value().and_then(Value::as_non_empty_str) else {
            return Ok(Resolution::Unresolved);
        };

        let secret = self.secrets.lookup(&config.secret)?;
        let info = context.resolve_info(&config.info_path)?;
        let crypt = Crypt::new(config.crypt.clone());

        let sealed = if config.password_based {
            crypt.encrypt_by_password(plaintext.as_bytes(), &secret, &info)
        } else {
            crypt.encrypt_by_key(plaintext.as_bytes(), &secret, &info)
        };
        let sealed = sealed.map_err(|e| e.into_error(context.property().name()))?;

        Ok(Resolution::resolved(Crypt::encode(&sealed)))
    }
}

impl ParameterResolver for EncryptedTransformer {
    fn parameter_value(
        &self,
        metadata: &TransformerMetadata,
        context: &ResolveContext<'_>,
    ) -> Result<Resolution> {
        let config = Self::config(metadata, context)?;
        let property = context.property().name();

        let payload = match context.resolved_value() {
            Some(Value::String(text)) if !text.is_empty() => {
                Crypt::decode(text).map_err(|e| e.into_error(property))?
            }
            Some(Value::Bytes(bytes)) if !bytes.is_empty() => bytes.clone(),
            _ => return Ok(Resolution::Unresolved),
        };

        let secret = self.secrets.lookup(&config.secret)?;
        let info = context.resolve_info(&config.info_path)?;
        let crypt = Crypt::new(config.crypt.clone());

        let opened = if config.password_based {
            crypt.decrypt_by_password(&payload, &secret, &info)
        } else {
            crypt.decrypt_by_key(&payload, &secret, &info)
        };
        let opened = opened.map_err(|e| e.into_error(property))?;

        let plaintext = String::from_utf8(opened).map_err(|_| Error::InvalidValue {
            property: property.to_string(),
            expected: "UTF-8 plaintext".to_string(),
            found: "non-UTF-8 bytes".to_string(),
        })?;

        Ok(Resolution::resolved(plaintext))
    }
}
