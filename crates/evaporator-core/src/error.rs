//! Error types for the Evaporator core library
//!
//! This module defines the error handling system for Evaporator, using thiserror
//! for ergonomic error definitions and anyhow for opaque collaborator failures.
//!
//! Errors fall into two families. Configuration errors are declaration or wiring
//! mistakes and are always fatal. Data errors are fatal to the single conversion
//! call that hit them. A transformer that has nothing to contribute does not
//! produce an error at all; it returns [`Resolution::Unresolved`].
//!
//! [`Resolution::Unresolved`]: crate::Resolution::Unresolved

use crate::transformer::Direction;
use thiserror::Error;

/// Main error type for Evaporator operations
#[derive(Error, Debug)]
pub enum Error {
    /// No transformer is registered for the metadata tag, or the registered
    /// transformer lacks the capability for the requested direction
    #[error("Transformer for \"{tag}\" cannot resolve {direction}: {message}")]
    UnresolvableTransformer {
        tag: String,
        direction: Direction,
        message: String,
    },

    /// A dot-path segment or record key could not be resolved
    #[error("Invalid path \"{path}\": segment \"{segment}\" could not be resolved")]
    InvalidPath {
        path: String,
        segment: String,
    },

    /// A transformer asked for the owning evaporator but none was supplied
    #[error("Evaporator is not set in the resolve context for property \"{property}\"")]
    MissingEvaporatorContext {
        property: String,
    },

    /// Ciphertext failed authentication (tampered, truncated or wrong context)
    #[error("Authentication failed for property \"{property}\": {message}")]
    Authentication {
        property: String,
        message: String,
    },

    /// The secret store has no entry for the requested name
    #[error("Secret not found: {name}")]
    SecretNotFound {
        name: String,
    },

    /// An object was asked to set a property it does not declare
    #[error("Unknown property \"{property}\" on {type_name}")]
    UnknownProperty {
        type_name: String,
        property: String,
    },

    /// A record carried a name that is not a member of the declared enum
    #[error("Unknown case \"{value}\" for enum {enum_name}")]
    UnknownEnumCase {
        enum_name: String,
        value: String,
    },

    /// A value had the wrong shape for the operation
    #[error("Invalid value for \"{property}\": expected {expected}, found {found}")]
    InvalidValue {
        property: String,
        expected: String,
        found: String,
    },

    /// Key derivation or cipher setup failed
    #[error("Crypto error: {message}")]
    Crypto {
        message: String,
    },

    /// Configuration loading errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an [`Error::InvalidValue`] from the offending value
    pub fn invalid_value(
        property: impl Into<String>,
        expected: impl Into<String>,
        found: &crate::Value,
    ) -> Self {
        Error::InvalidValue {
            property: property.into(),
            expected: expected.into(),
            found: found.kind().to_string(),
        }
    }

    /// Whether the error stems from a declaration or wiring mistake
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnresolvableTransformer { .. }
                | Error::InvalidPath { .. }
                | Error::MissingEvaporatorContext { .. }
                | Error::UnknownProperty { .. }
                | Error::Crypto { .. }
                | Error::Configuration { .. }
                | Error::Json { .. }
        )
    }

    /// Whether the error stems from the data being converted
    pub fn is_data(&self) -> bool {
        !self.is_configuration()
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
