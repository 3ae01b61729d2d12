//! Startup-time feature registration.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::feature::{builtin_features, Feature};
use crate::config::{EngineConfig, GRANT_ID_DELIMITER};

/// Errors raised while building the registry. All of them are fatal
/// configuration errors; the registry is never built partially.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    /// Two features were registered under the same name.
    #[error("duplicate feature name: {name}")]
    DuplicateFeature {
        /// The colliding name.
        name: String,
    },

    /// A feature name is empty or contains the grant-id delimiter.
    #[error("invalid feature name: {name:?}")]
    InvalidFeatureName {
        /// The rejected name.
        name: String,
    },

    /// Configuration enabled a feature no implementation exists for.
    #[error("unknown feature enabled in config: {name}")]
    UnknownFeature {
        /// The unmatched name.
        name: String,
    },
}

/// The immutable map from feature name to evaluator.
///
/// Built once at startup from an explicit [`EngineConfig`]; there is no
/// way to register a feature afterwards.
pub struct FeatureRegistry {
    features: HashMap<&'static str, Arc<dyn Feature>>,
}

impl FeatureRegistry {
    /// Builds the registry from the built-in feature set, filtered by the
    /// names enabled in config.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownFeature`] for an enabled name with
    /// no implementation, and the registration errors of
    /// [`Self::with_features`].
    pub fn from_config(config: &EngineConfig) -> Result<Self, RegistryError> {
        let available: HashMap<&'static str, Arc<dyn Feature>> = builtin_features()
            .into_iter()
            .map(|feature| (feature.name(), feature))
            .collect();

        let mut enabled = Vec::with_capacity(config.authorization.features.len());
        for name in &config.authorization.features {
            let feature =
                available
                    .get(name.as_str())
                    .ok_or_else(|| RegistryError::UnknownFeature {
                        name: name.clone(),
                    })?;
            enabled.push(Arc::clone(feature));
        }
        Self::with_features(enabled)
    }

    /// Builds the registry from an explicit feature list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidFeatureName`] for an empty name or
    /// one containing the grant-id delimiter, and
    /// [`RegistryError::DuplicateFeature`] for a name collision.
    pub fn with_features(
        features: impl IntoIterator<Item = Arc<dyn Feature>>,
    ) -> Result<Self, RegistryError> {
        let mut map: HashMap<&'static str, Arc<dyn Feature>> = HashMap::new();
        for feature in features {
            let name = feature.name();
            if name.is_empty() || name.contains(GRANT_ID_DELIMITER) {
                return Err(RegistryError::InvalidFeatureName {
                    name: name.to_string(),
                });
            }
            if map.insert(name, feature).is_some() {
                return Err(RegistryError::DuplicateFeature {
                    name: name.to_string(),
                });
            }
            debug!(feature = name, "registered authorization feature");
        }
        Ok(Self { features: map })
    }

    /// Looks up a feature by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Arc<dyn Feature>> {
        self.features.get(name)
    }

    /// Returns the registered feature names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.features.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if no features are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl std::fmt::Debug for FeatureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureRegistry")
            .field("features", &self.names())
            .finish()
    }
}
