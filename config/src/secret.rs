//! # API Key Handling
//!
//! The language-model API key is supplied at startup, never shipped in the
//! configuration. Missing keys fail fast with `ConfigError::MissingSecret`.

use errors::ConfigError;
use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Language-model API key.
///
/// The buffer is wiped on drop and `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Reads the key from `variable`. Unset, blank and non-unicode values
    /// count as absent.
    pub fn from_env(variable: &str) -> Option<Self> {
        std::env::var(variable)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| Self(value.trim().to_string()))
    }

    /// The raw key, for the `Authorization` header of the consumer.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Resolve the API key: an explicitly supplied non-blank key wins, otherwise
/// the key is read from `variable`.
pub fn resolve_api_key(explicit: Option<ApiKey>, variable: &str) -> Result<ApiKey, ConfigError> {
    if let Some(key) = explicit.filter(|key| !key.is_blank()) {
        debug!("Using explicitly supplied API key");
        return Ok(key);
    }

    match ApiKey::from_env(variable) {
        Some(key) => {
            debug!("Using API key from {}", variable);
            Ok(key)
        }
        None => Err(ConfigError::MissingSecret {
            variable: variable.to_string()
        })
    }
}
