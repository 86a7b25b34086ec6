//! Secret lookup
//!
//! Encryption transformers name their key or password; the [`SecretStore`]
//! handed to the registry turns that name into key material.

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Source of named secrets
pub trait SecretStore: Send + Sync {
    /// Key material or password for `name`
    fn lookup(&self, name: &str) -> Result<Vec<u8>>;
}

/// Reads secrets from the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a `.env` file from the working directory (or its parents) first
    ///
    /// A missing file is not an error; variables already set are kept.
    pub fn from_dotenv() -> Self {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!("no .env file loaded: {}", e);
        }
        Self
    }

    /// Load a specific `.env` file first
    pub fn from_dotenv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        dotenv::from_path(path).map_err(|e| Error::Configuration {
            message: format!("failed to load {}", path.display()),
            source: Some(anyhow::Error::new(e)),
        })?;
        Ok(Self)
    }
}

impl SecretStore for EnvSecretStore {
    fn lookup(&self, name: &str) -> Result<Vec<u8>> {
        std::env::var_os(name)
            .map(|value| value.into_encoded_bytes())
            .ok_or_else(|| Error::SecretNotFound {
                name: name.to_string(),
            })
    }
}

/// Fixed in-memory secrets, for tests and embedding
#[derive(Clone, Default)]
pub struct MemorySecretStore {
    secrets: HashMap<String, Vec<u8>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, name: impl Into<String>, secret: impl AsRef<[u8]>) -> Self {
        self.secrets.insert(name.into(), secret.as_ref().to_vec());
        self
    }
}

impl std::fmt::Debug for MemorySecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySecretStore")
            .field("names", &self.secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SecretStore for MemorySecretStore {
    fn lookup(&self, name: &str) -> Result<Vec<u8>> {
        self.secrets
            .get(name)
            .cloned()
            .ok_or_else(|| Error::SecretNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_memory_store_lookup() {
        let store = MemorySecretStore::new().with_secret("KEY", b"0123456789abcdef");
        assert_eq!(store.lookup("KEY").unwrap(), b"0123456789abcdef".to_vec());
        assert!(matches!(
            store.lookup("OTHER"),
            Err(Error::SecretNotFound { name }) if name == "OTHER"
        ));
    }

    #[test]
    fn test_debug_hides_secret_values() {
        let store = MemorySecretStore::new().with_secret("KEY", b"hunter2");
        let rendered = format!("{store:?}");
        assert!(rendered.contains("KEY"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_env_store_reads_dotenv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "EVAPORATOR_TEST_DOTENV_SECRET=from-file").unwrap();

        let store = EnvSecretStore::from_dotenv_path(file.path()).unwrap();
        assert_eq!(
            store.lookup("EVAPORATOR_TEST_DOTENV_SECRET").unwrap(),
            b"from-file".to_vec()
        );
    }

    #[test]
    fn test_env_store_missing_variable() {
        let store = EnvSecretStore::new();
        assert!(matches!(
            store.lookup("EVAPORATOR_TEST_SURELY_UNSET_VARIABLE"),
            Err(Error::SecretNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_dotenv_path_is_configuration_error() {
        let err = EnvSecretStore::from_dotenv_path("/nonexistent/evaporator/.env").unwrap_err();
        assert!(err.is_configuration());
    }
}
