//! Authenticated symmetric encryption for property values
//!
//! Payload layout, base64-encoded when stored as text:
//!
//! ```text
//! [SALT(key_len)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! The content key is derived per message from the random salt. In key mode
//! the secret is HKDF input keying material; in password mode it is first
//! stretched with PBKDF2. Either way the caller's `info` string goes into the
//! final HKDF step, so ciphertext only authenticates under the same info.

use crate::Error;
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hkdf::Hkdf;
use hmac::Hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Default PBKDF2 iteration count
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Default additional authenticated data
pub const DEFAULT_AUTH_KEY_INFO: &str = "AuthorizationKey";

/// AEAD cipher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CipherKind {
    #[default]
    Aes128Gcm,
    Aes256Gcm,
}

impl CipherKind {
    pub fn key_len(self) -> usize {
        match self {
            CipherKind::Aes128Gcm => 16,
            CipherKind::Aes256Gcm => 32,
        }
    }
}

/// Hash used by the key-derivation functions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KdfAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

/// Immutable cipher configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CryptConfig {
    pub cipher: CipherKind,
    pub kdf: KdfAlgorithm,
    pub iterations: u32,
    pub auth_key_info: String,
}

impl Default for CryptConfig {
    fn default() -> Self {
        Self {
            cipher: CipherKind::default(),
            kdf: KdfAlgorithm::default(),
            iterations: DEFAULT_ITERATIONS,
            auth_key_info: DEFAULT_AUTH_KEY_INFO.to_string(),
        }
    }
}

/// Failure of a [`Crypt`] operation, before it is attributed to a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptError {
    /// Payload malformed or failed authentication
    Authentication(String),
    /// Derivation or cipher setup failed
    Setup(String),
}

impl CryptError {
    /// Attribute the failure to `property`
    pub fn into_error(self, property: &str) -> Error {
        match self {
            CryptError::Authentication(message) => Error::Authentication {
                property: property.to_string(),
                message,
            },
            CryptError::Setup(message) => Error::Crypto { message },
        }
    }
}

type CryptResult<T> = std::result::Result<T, CryptError>;

/// Encrypts and decrypts with a fixed [`CryptConfig`]
#[derive(Debug, Clone, Default)]
pub struct Crypt {
    config: CryptConfig,
}

impl Crypt {
    pub fn new(config: CryptConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CryptConfig {
        &self.config
    }

    /// Encrypt with key material; `info` binds the ciphertext to a context
    pub fn encrypt_by_key(&self, plaintext: &[u8], key: &[u8], info: &str) -> CryptResult<Vec<u8>> {
        let salt = random_bytes(self.config.cipher.key_len());
        let content_key = self.hkdf(key, Some(&salt), info)?;
        self.seal(salt, &content_key, plaintext)
    }

    pub fn decrypt_by_key(&self, payload: &[u8], key: &[u8], info: &str) -> CryptResult<Vec<u8>> {
        let (salt, nonce, sealed) = self.split(payload)?;
        let content_key = self.hkdf(key, Some(salt), info)?;
        self.open(&content_key, nonce, sealed)
    }

    /// Encrypt with a password stretched by PBKDF2
    pub fn encrypt_by_password(
        &self,
        plaintext: &[u8],
        password: &[u8],
        info: &str,
    ) -> CryptResult<Vec<u8>> {
        let salt = random_bytes(self.config.cipher.key_len());
        let content_key = self.password_key(password, &salt, info)?;
        self.seal(salt, &content_key, plaintext)
    }

    pub fn decrypt_by_password(
        &self,
        payload: &[u8],
        password: &[u8],
        info: &str,
    ) -> CryptResult<Vec<u8>> {
        let (salt, nonce, sealed) = self.split(payload)?;
        let content_key = self.password_key(password, salt, info)?;
        self.open(&content_key, nonce, sealed)
    }

    /// Base64 text form of a payload
    pub fn encode(payload: &[u8]) -> String {
        STANDARD.encode(payload)
    }

    pub fn decode(text: &str) -> CryptResult<Vec<u8>> {
        STANDARD
            .decode(text)
            .map_err(|e| CryptError::Authentication(format!("payload is not base64: {e}")))
    }

    fn seal(&self, mut salt: Vec<u8>, content_key: &[u8], plaintext: &[u8]) -> CryptResult<Vec<u8>> {
        let nonce = random_bytes(NONCE_LEN);
        let payload = Payload {
            msg: plaintext,
            aad: self.config.auth_key_info.as_bytes(),
        };
        let sealed = match self.config.cipher {
            CipherKind::Aes128Gcm => Aes128Gcm::new_from_slice(content_key)
                .map_err(|e| CryptError::Setup(e.to_string()))?
                .encrypt(Nonce::from_slice(&nonce), payload),
            CipherKind::Aes256Gcm => Aes256Gcm::new_from_slice(content_key)
                .map_err(|e| CryptError::Setup(e.to_string()))?
                .encrypt(Nonce::from_slice(&nonce), payload),
        }
        .map_err(|_| CryptError::Setup("encryption failed".to_string()))?;

        salt.reserve(NONCE_LEN + sealed.len());
        salt.extend_from_slice(&nonce);
        salt.extend_from_slice(&sealed);
        Ok(salt)
    }

    fn open(&self, content_key: &[u8], nonce: &[u8], sealed: &[u8]) -> CryptResult<Vec<u8>> {
        let payload = Payload {
            msg: sealed,
            aad: self.config.auth_key_info.as_bytes(),
        };
        let opened = match self.config.cipher {
            CipherKind::Aes128Gcm => Aes128Gcm::new_from_slice(content_key)
                .map_err(|e| CryptError::Setup(e.to_string()))?
                .decrypt(Nonce::from_slice(nonce), payload),
            CipherKind::Aes256Gcm => Aes256Gcm::new_from_slice(content_key)
                .map_err(|e| CryptError::Setup(e.to_string()))?
                .decrypt(Nonce::from_slice(nonce), payload),
        };
        opened.map_err(|_| CryptError::Authentication("authentication tag mismatch".to_string()))
    }

    fn split<'p>(&self, payload: &'p [u8]) -> CryptResult<(&'p [u8], &'p [u8], &'p [u8])> {
        let salt_len = self.config.cipher.key_len();
        if payload.len() < salt_len + NONCE_LEN + TAG_LEN {
            return Err(CryptError::Authentication(format!(
                "payload too short: {} bytes",
                payload.len()
            )));
        }
        let (salt, rest) = payload.split_at(salt_len);
        let (nonce, sealed) = rest.split_at(NONCE_LEN);
        Ok((salt, nonce, sealed))
    }

    fn password_key(&self, password: &[u8], salt: &[u8], info: &str) -> CryptResult<Vec<u8>> {
        let mut prk = vec![0u8; self.config.cipher.key_len()];
        let stretched = match self.config.kdf {
            KdfAlgorithm::Sha256 => {
                pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, self.config.iterations, &mut prk)
            }
            KdfAlgorithm::Sha384 => {
                pbkdf2::pbkdf2::<Hmac<Sha384>>(password, salt, self.config.iterations, &mut prk)
            }
            KdfAlgorithm::Sha512 => {
                pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, self.config.iterations, &mut prk)
            }
        };
        stretched.map_err(|e| CryptError::Setup(format!("PBKDF2 failed: {e}")))?;
        self.hkdf(&prk, None, info)
    }

    fn hkdf(&self, ikm: &[u8], salt: Option<&[u8]>, info: &str) -> CryptResult<Vec<u8>> {
        let mut okm = vec![0u8; self.config.cipher.key_len()];
        let expanded = match self.config.kdf {
            KdfAlgorithm::Sha256 => Hkdf::<Sha256>::new(salt, ikm).expand(info.as_bytes(), &mut okm),
            KdfAlgorithm::Sha384 => Hkdf::<Sha384>::new(salt, ikm).expand(info.as_bytes(), &mut okm),
            KdfAlgorithm::Sha512 => Hkdf::<Sha512>::new(salt, ikm).expand(info.as_bytes(), &mut okm),
        };
        expanded.map_err(|e| CryptError::Setup(format!("HKDF failed: {e}")))?;
        Ok(okm)
    }
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    buf
}
