//! Configuration for the translation catalog.
//!
//! The section is handed over as raw JSON by the host application. Loading is
//! lenient: a missing section yields [`ProblemsConfig::default`], a present
//! but malformed one is an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cultures with shipped translations.
pub const DEFAULT_SUPPORTED_LOCALES: &[&str] = &[
    "ar", "bg", "cs", "cy", "da", "de", "el", "en", "es", "et", "fi", "fil", "fr", "ga", "hi",
    "hr", "hu", "it", "ja", "ko", "lt", "lv", "mt", "nl", "pl", "ro", "ru", "sk", "sl", "sv", "vi",
    "zh",
];

/// Configuration error for the problems section.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("problems config must be an object")]
    InvalidStructure,
    #[error("invalid problems config: {source}")]
    InvalidConfig {
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid message catalog for locale '{locale}': {source}")]
    InvalidCatalog {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProblemsConfig {
    /// Locales whose catalogs may be consulted. Empty means no restriction.
    pub supported_locales: Vec<String>,
    /// Inline catalogs: locale tag -> message key -> template.
    pub catalogs: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for ProblemsConfig {
    fn default() -> Self {
        Self {
            supported_locales: DEFAULT_SUPPORTED_LOCALES
                .iter()
                .map(|tag| (*tag).to_owned())
                .collect(),
            catalogs: BTreeMap::new(),
        }
    }
}

impl ProblemsConfig {
    /// Loads the config from an optional raw section.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidStructure` if the section is not an object
    /// and `ConfigError::InvalidConfig` if it cannot be deserialized.
    pub fn from_section(section: Option<&serde_json::Value>) -> Result<Self, ConfigError> {
        let Some(raw) = section else {
            return Ok(Self::default());
        };
        if raw.is_null() {
            return Ok(Self::default());
        }
        if !raw.is_object() {
            return Err(ConfigError::InvalidStructure);
        }
        serde_json::from_value(raw.clone()).map_err(|source| ConfigError::InvalidConfig { source })
    }
}
