//! Object type tags and typed object references.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ObjectError;

/// Type tag for addressable domain objects.
///
/// Each type has a stable lowercase label used inside composite grant
/// identifiers, and a stable numeric code used by the resource-policy
/// layer. Both are part of the public contract and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    /// A stored bitstream.
    Bitstream,
    /// A bundle grouping bitstreams under an item.
    Bundle,
    /// An archival item.
    Item,
    /// A collection of items.
    Collection,
    /// A community of collections.
    Community,
    /// The site singleton.
    Site,
    /// A group of accounts.
    Group,
    /// An individual account.
    EPerson,
}

impl ObjectType {
    /// All object types, in code order.
    pub const ALL: [Self; 8] = [
        Self::Bitstream,
        Self::Bundle,
        Self::Item,
        Self::Collection,
        Self::Community,
        Self::Site,
        Self::Group,
        Self::EPerson,
    ];

    /// Returns the lowercase label used in grant identifiers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bitstream => "bitstream",
            Self::Bundle => "bundle",
            Self::Item => "item",
            Self::Collection => "collection",
            Self::Community => "community",
            Self::Site => "site",
            Self::Group => "group",
            Self::EPerson => "eperson",
        }
    }

    /// Returns the numeric type code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Bitstream => 0,
            Self::Bundle => 1,
            Self::Item => 2,
            Self::Collection => 3,
            Self::Community => 4,
            Self::Site => 5,
            Self::Group => 6,
            Self::EPerson => 7,
        }
    }

    /// Creates an object type from its numeric code.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::UnknownTypeCode`] if the code is not assigned.
    pub fn from_code(code: u8) -> Result<Self, ObjectError> {
        match code {
            0 => Ok(Self::Bitstream),
            1 => Ok(Self::Bundle),
            2 => Ok(Self::Item),
            3 => Ok(Self::Collection),
            4 => Ok(Self::Community),
            5 => Ok(Self::Site),
            6 => Ok(Self::Group),
            7 => Ok(Self::EPerson),
            _ => Err(ObjectError::UnknownTypeCode { code }),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = ObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bitstream" => Ok(Self::Bitstream),
            "bundle" => Ok(Self::Bundle),
            "item" => Ok(Self::Item),
            "collection" => Ok(Self::Collection),
            "community" => Ok(Self::Community),
            "site" => Ok(Self::Site),
            "group" => Ok(Self::Group),
            "eperson" => Ok(Self::EPerson),
            _ => Err(ObjectError::UnknownTypeLabel {
                label: s.to_string(),
            }),
        }
    }
}

/// A typed reference to an addressable domain object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// The type tag of the referenced object.
    pub object_type: ObjectType,
    /// The opaque identifier of the referenced object.
    pub id: Uuid,
}

impl ObjectRef {
    /// Creates a new object reference.
    #[must_use]
    pub const fn new(object_type: ObjectType, id: Uuid) -> Self {
        Self { object_type, id }
    }

    /// Creates a reference to an item.
    #[must_use]
    pub const fn item(id: Uuid) -> Self {
        Self::new(ObjectType::Item, id)
    }

    /// Creates a reference to an account.
    #[must_use]
    pub const fn eperson(id: Uuid) -> Self {
        Self::new(ObjectType::EPerson, id)
    }

    /// Creates a reference to the site singleton.
    #[must_use]
    pub const fn site(id: Uuid) -> Self {
        Self::new(ObjectType::Site, id)
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.object_type, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for ty in ObjectType::ALL {
            let parsed: ObjectType = ty.label().parse().unwrap();
            assert_eq!(parsed, ty);
        }
    }

    #[test]
    fn test_code_roundtrip() {
        for ty in ObjectType::ALL {
            assert_eq!(ObjectType::from_code(ty.code()).unwrap(), ty);
        }
        assert!(matches!(
            ObjectType::from_code(42),
            Err(ObjectError::UnknownTypeCode { code: 42 })
        ));
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!(matches!(
            "workspaceitem".parse::<ObjectType>(),
            Err(ObjectError::UnknownTypeLabel { .. })
        ));
    }
}
