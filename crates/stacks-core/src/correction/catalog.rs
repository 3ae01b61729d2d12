//! The correction-type catalog.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, CorrectionTypeConfig, EngineConfig};
use crate::object::Item;

/// Tri-state predicate over item state flags.
///
/// `Some(expected)` requires the flag to equal `expected`; `None` ignores
/// the flag. The catalog decides applicability by predicate alone and
/// never special-cases a type by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliesWhen {
    /// Required `archived` flag, if constrained.
    pub archived: Option<bool>,
    /// Required `withdrawn` flag, if constrained.
    pub withdrawn: Option<bool>,
    /// Required `discoverable` flag, if constrained.
    pub discoverable: Option<bool>,
    /// Whether an open correction on the item rules the type out.
    pub require_no_open_correction: bool,
}

impl AppliesWhen {
    /// Evaluates the predicate against an item's state.
    #[must_use]
    pub fn matches(&self, item: &Item, has_open_correction: bool) -> bool {
        if self.require_no_open_correction && has_open_correction {
            return false;
        }
        let flag_ok = |constraint: Option<bool>, actual: bool| {
            constraint.is_none_or(|expected| expected == actual)
        };
        flag_ok(self.archived, item.archived)
            && flag_ok(self.withdrawn, item.withdrawn)
            && flag_ok(self.discoverable, item.discoverable)
    }
}

/// A configured correction type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionType {
    /// Unique catalog id.
    pub id: String,
    /// Unique submission topic.
    pub topic: String,
    /// The applicability predicate.
    pub applies_when: AppliesWhen,
}

impl CorrectionType {
    /// Returns true if the type applies to the item in its current state.
    #[must_use]
    pub fn applies_to(&self, item: &Item, has_open_correction: bool) -> bool {
        self.applies_when.matches(item, has_open_correction)
    }
}

impl From<&CorrectionTypeConfig> for CorrectionType {
    fn from(config: &CorrectionTypeConfig) -> Self {
        Self {
            id: config.id.clone(),
            topic: config.topic.clone(),
            applies_when: AppliesWhen {
                archived: config.archived,
                withdrawn: config.withdrawn,
                discoverable: config.discoverable,
                require_no_open_correction: config.require_no_open_correction,
            },
        }
    }
}

/// The configured, immutable list of correction types.
#[derive(Debug, Clone)]
pub struct CorrectionCatalog {
    types: Vec<CorrectionType>,
}

impl CorrectionCatalog {
    /// Builds the catalog from config.
    ///
    /// # Errors
    ///
    /// Returns a validation error for duplicate ids or topics.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            types: config.correction.types.iter().map(Into::into).collect(),
        })
    }

    /// Returns every configured type.
    #[must_use]
    pub fn all(&self) -> &[CorrectionType] {
        &self.types
    }

    /// Looks up a type by catalog id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&CorrectionType> {
        self.types.iter().find(|ty| ty.id == id)
    }

    /// Looks up a type by submission topic.
    #[must_use]
    pub fn by_topic(&self, topic: &str) -> Option<&CorrectionType> {
        self.types.iter().find(|ty| ty.topic == topic)
    }

    /// Returns the types applicable to the item in its current state.
    ///
    /// Each type's predicate is evaluated independently; the catalog holds
    /// no per-name logic.
    #[must_use]
    pub fn applicable_for(&self, item: &Item, has_open_correction: bool) -> Vec<&CorrectionType> {
        self.types
            .iter()
            .filter(|ty| ty.applies_to(item, has_open_correction))
            .collect()
    }
}
