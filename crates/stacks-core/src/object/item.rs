//! Items, collections, and metadata fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ObjectError;

/// A metadata field key of the form `schema.element[.qualifier]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetadataField {
    /// Schema name (e.g. `dc`).
    pub schema: String,
    /// Element name (e.g. `title`).
    pub element: String,
    /// Optional qualifier (e.g. `alternative`).
    pub qualifier: Option<String>,
}

impl MetadataField {
    /// Creates an unqualified field.
    #[must_use]
    pub fn new(schema: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            element: element.into(),
            qualifier: None,
        }
    }

    /// Creates a qualified field.
    #[must_use]
    pub fn qualified(
        schema: impl Into<String>,
        element: impl Into<String>,
        qualifier: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            element: element.into(),
            qualifier: Some(qualifier.into()),
        }
    }

    /// The `dc.title` field.
    #[must_use]
    pub fn title() -> Self {
        Self::new("dc", "title")
    }
}

impl std::fmt::Display for MetadataField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{}.{}.{q}", self.schema, self.element),
            None => write!(f, "{}.{}", self.schema, self.element),
        }
    }
}

impl std::str::FromStr for MetadataField {
    type Err = ObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ObjectError::InvalidMetadataField { key: s.to_string() };
        let mut parts = s.split('.');
        let schema = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let element = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let qualifier = parts.next().map(str::to_string);
        if qualifier.as_deref() == Some("") || parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self {
            schema: schema.to_string(),
            element: element.to_string(),
            qualifier,
        })
    }
}

/// An archival item.
///
/// State flags follow the repository lifecycle: a freshly created item is a
/// workspace item (`archived = false`), installation sets `archived`, and
/// withdrawal clears `archived` while setting `withdrawn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The item identifier.
    pub id: Uuid,
    /// The owning collection.
    pub collection_id: Uuid,
    /// The submitting account, if known.
    pub submitter: Option<Uuid>,
    /// Ordered metadata values keyed by field.
    pub metadata: BTreeMap<MetadataField, Vec<String>>,
    /// Whether the item is installed in the archive.
    pub archived: bool,
    /// Whether the item has been withdrawn from the archive.
    pub withdrawn: bool,
    /// Whether the item is exposed to discovery.
    pub discoverable: bool,
}

impl Item {
    /// Creates a new workspace item in the given collection.
    #[must_use]
    pub fn workspace(id: Uuid, collection_id: Uuid) -> Self {
        Self {
            id,
            collection_id,
            submitter: None,
            metadata: BTreeMap::new(),
            archived: false,
            withdrawn: false,
            discoverable: true,
        }
    }

    /// Sets the submitter.
    #[must_use]
    pub const fn with_submitter(mut self, submitter: Uuid) -> Self {
        self.submitter = Some(submitter);
        self
    }

    /// Returns true if the item is still an editable workspace item.
    #[must_use]
    pub const fn is_workspace(&self) -> bool {
        !self.archived && !self.withdrawn
    }

    /// Returns the first value of the given field, if any.
    #[must_use]
    pub fn first_value(&self, field: &MetadataField) -> Option<&str> {
        self.metadata
            .get(field)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Replaces all values of the given field.
    pub fn set_value(&mut self, field: MetadataField, value: impl Into<String>) {
        self.metadata.insert(field, vec![value.into()]);
    }

    /// Appends a value to the given field.
    pub fn append_value(&mut self, field: MetadataField, value: impl Into<String>) {
        self.metadata.entry(field).or_default().push(value.into());
    }

    /// Returns the item title (`dc.title`), if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.first_value(&MetadataField::title())
    }

    /// Sets the item title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.set_value(MetadataField::title(), title);
    }

    /// Installs the item into the archive.
    pub fn install(&mut self) {
        self.archived = true;
        self.withdrawn = false;
    }

    /// Withdraws the item from the archive.
    pub fn withdraw(&mut self) {
        self.archived = false;
        self.withdrawn = true;
    }

    /// Reinstates a withdrawn item.
    pub fn reinstate(&mut self) {
        self.archived = true;
        self.withdrawn = false;
    }
}

/// A collection of items, carrying the review configuration for
/// submissions made into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// The collection identifier.
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// Group whose members review submissions into this collection.
    ///
    /// `None` means submissions bypass review entirely.
    pub reviewer_group: Option<Uuid>,
}

impl Collection {
    /// Creates a collection without a review step.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            reviewer_group: None,
        }
    }

    /// Sets the reviewer group.
    #[must_use]
    pub const fn with_reviewer_group(mut self, group: Uuid) -> Self {
        self.reviewer_group = Some(group);
        self
    }
}
