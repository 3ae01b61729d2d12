//! Engine configuration parsing and validation.
//!
//! Configuration is an explicit struct handed to the kernel constructors at
//! startup; nothing reads ambient global state during request handling.
//! Parsing is fail-closed: a config that names the same feature twice, or a
//! feature whose name would be ambiguous inside a composite grant
//! identifier, is rejected before any component is built.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delimiter used by composite grant identifiers.
///
/// Feature names must not contain it; the strict grant-id parser depends
/// on the restriction.
pub const GRANT_ID_DELIMITER: char = '_';

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Authorization feature configuration.
    #[serde(default)]
    pub authorization: AuthorizationConfig,

    /// Correction catalog configuration.
    #[serde(default)]
    pub correction: CorrectionConfig,
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on:
    /// - a duplicate enabled feature name
    /// - an empty feature name, or one containing the grant-id delimiter
    /// - a duplicate correction type id or topic
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen_features = std::collections::HashSet::new();
        for name in &self.authorization.features {
            if name.is_empty() {
                return Err(ConfigError::Validation(
                    "feature name must not be empty".to_string(),
                ));
            }
            if name.contains(GRANT_ID_DELIMITER) {
                return Err(ConfigError::Validation(format!(
                    "feature name '{name}' contains the grant-id delimiter '{GRANT_ID_DELIMITER}'"
                )));
            }
            if !seen_features.insert(name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate feature name: {name}"
                )));
            }
        }

        let mut seen_ids = std::collections::HashSet::new();
        let mut seen_topics = std::collections::HashSet::new();
        for ty in &self.correction.types {
            if ty.id.is_empty() {
                return Err(ConfigError::Validation(
                    "correction type id must not be empty".to_string(),
                ));
            }
            if !seen_ids.insert(ty.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate correction type id: {}",
                    ty.id
                )));
            }
            if !seen_topics.insert(ty.topic.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate correction type topic: {}",
                    ty.topic
                )));
            }
        }

        Ok(())
    }
}

/// Authorization feature configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationConfig {
    /// Names of the features enabled at startup.
    ///
    /// Every name must match a known feature; an unknown name is a fatal
    /// registry error, not a silent skip.
    #[serde(default = "default_features")]
    pub features: Vec<String>,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            features: default_features(),
        }
    }
}

fn default_features() -> Vec<String> {
    [
        "alwaystrue",
        "alwaysfalse",
        "alwaysraise",
        "trueforadmins",
        "trueforloggedusers",
        "canchangepassword",
    ]
    .map(str::to_string)
    .to_vec()
}

/// Correction catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionConfig {
    /// The configured correction types.
    #[serde(default = "default_correction_types")]
    pub types: Vec<CorrectionTypeConfig>,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            types: default_correction_types(),
        }
    }
}

fn default_correction_types() -> Vec<CorrectionTypeConfig> {
    vec![
        CorrectionTypeConfig {
            id: "withdraw".to_string(),
            topic: "REQUEST/WITHDRAW".to_string(),
            archived: Some(true),
            withdrawn: Some(false),
            discoverable: None,
            require_no_open_correction: true,
        },
        CorrectionTypeConfig {
            id: "reinstate".to_string(),
            topic: "REQUEST/REINSTATE".to_string(),
            archived: None,
            withdrawn: Some(true),
            discoverable: None,
            require_no_open_correction: true,
        },
    ]
}

/// One configured correction type.
///
/// The three optional flags form a tri-state predicate over item state:
/// `Some(expected)` requires the flag to equal `expected`, `None` ignores
/// it. The catalog never special-cases types by name, only by predicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionTypeConfig {
    /// Unique catalog id.
    pub id: String,
    /// Unique submission topic (e.g. `REQUEST/WITHDRAW`).
    pub topic: String,
    /// Required `archived` flag, if constrained.
    #[serde(default)]
    pub archived: Option<bool>,
    /// Required `withdrawn` flag, if constrained.
    #[serde(default)]
    pub withdrawn: Option<bool>,
    /// Required `discoverable` flag, if constrained.
    #[serde(default)]
    pub discoverable: Option<bool>,
    /// Whether the type is inapplicable while the item already has an open
    /// correction.
    #[serde(default = "default_true")]
    pub require_no_open_correction: bool,
}

const fn default_true() -> bool {
    true
}

/// Configuration error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize the configuration.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration is structurally valid but semantically rejected.
    #[error("invalid config: {0}")]
    Validation(String),
}
