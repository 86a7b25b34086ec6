//! Evaporator configuration
//!
//! Configuration is a plain serde value. It can be built in code, parsed from
//! JSON, or read from `EVAPORATOR_*` environment variables.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Order in which a property's transformers run on the record → object pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainOrder {
    /// Same order as declared, like the object → record pass
    #[default]
    Declaration,
    /// Reverse of declaration order, undoing the object → record chain
    Mirrored,
}

/// What the enum codec does with a record value naming no declared member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownEnumPolicy {
    /// Leave the property unresolved
    #[default]
    Decline,
    /// Fail the conversion with [`Error::UnknownEnumCase`]
    Error,
}

/// Evaporator settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaporatorConfig {
    pub reverse_chain: ChainOrder,
    pub unknown_enum: UnknownEnumPolicy,
    /// Load a `.env` file before reading secrets from the environment
    pub load_dotenv: bool,
}

impl EvaporatorConfig {
    pub const ENV_REVERSE_CHAIN: &'static str = "EVAPORATOR_REVERSE_CHAIN";
    pub const ENV_UNKNOWN_ENUM: &'static str = "EVAPORATOR_UNKNOWN_ENUM";
    pub const ENV_LOAD_DOTENV: &'static str = "EVAPORATOR_LOAD_DOTENV";

    /// Parse from JSON; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by any `EVAPORATOR_*` variables that are set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::ENV_REVERSE_CHAIN) {
            config.reverse_chain = parse_setting(Self::ENV_REVERSE_CHAIN, &value)?;
        }
        if let Some(value) = lookup(Self::ENV_UNKNOWN_ENUM) {
            config.unknown_enum = parse_setting(Self::ENV_UNKNOWN_ENUM, &value)?;
        }
        if let Some(value) = lookup(Self::ENV_LOAD_DOTENV) {
            config.load_dotenv = parse_setting(Self::ENV_LOAD_DOTENV, &value)?;
        }

        Ok(config)
    }
}

impl FromStr for ChainOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "declaration" => Ok(ChainOrder::Declaration),
            "mirrored" => Ok(ChainOrder::Mirrored),
            other => Err(format!("expected declaration or mirrored, got {other:?}")),
        }
    }
}

impl FromStr for UnknownEnumPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decline" => Ok(UnknownEnumPolicy::Decline),
            "error" => Ok(UnknownEnumPolicy::Error),
            other => Err(format!("expected decline or error, got {other:?}")),
        }
    }
}

fn parse_setting<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| Error::Configuration {
        message: format!("invalid {name}: {e}"),
        source: None,
    })
}
