//! Stored document envelope shared by every collection.
//!
//! Entities are persisted as JSON bodies next to the store-assigned identity
//! and timestamps. Typed models (see [`crate::models`]) are converted to and
//! from [`RawDocument`] at the repository boundary.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Result, StorageError};

/// One collection (table) per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Clubs,
    Competitions,
    Players,
    Schedules,
    Materials,
    ContentSections,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Clubs,
        Collection::Competitions,
        Collection::Players,
        Collection::Schedules,
        Collection::Materials,
        Collection::ContentSections,
        Collection::Users,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Self::Clubs => "clubs",
            Self::Competitions => "competitions",
            Self::Players => "players",
            Self::Schedules => "schedules",
            Self::Materials => "materials",
            Self::ContentSections => "content_sections",
            Self::Users => "users",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Self::Clubs => "Club",
            Self::Competitions => "Competition",
            Self::Players => "Player",
            Self::Schedules => "Schedule",
            Self::Materials => "Material",
            Self::ContentSections => "Content section",
            Self::Users => "User",
        }
    }

    /// Boolean field of which at most one document may hold `true`.
    ///
    /// Stores clear the flag on every other document in the same write that
    /// sets it.
    pub fn exclusive_flag(self) -> Option<&'static str> {
        match self {
            Self::Materials => Some("isMain"),
            _ => None,
        }
    }

    /// Fields whose values must be unique across the collection.
    pub fn unique_fields(self) -> &'static [&'static str] {
        match self {
            Self::Users => &["email"],
            _ => &[],
        }
    }

    pub fn duplicate_message(self) -> String {
        match self {
            Self::Users => {
                "User already exists. Provide another email address or log in instead.".to_string()
            }
            other => format!("{} already exists", other.singular()),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// A document as held by a store, before typed decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub id: Uuid,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RawDocument {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name).filter(|v| !v.is_null())
    }

    pub fn flag(&self, name: &str) -> bool {
        self.field(name).and_then(Value::as_bool).unwrap_or(false)
    }
}

/// Implemented by every persisted model.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;
}

/// A decoded document together with its store-assigned identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<T> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub doc: T,
}

impl<T: Document> Stored<T> {
    pub fn decode(raw: RawDocument) -> Result<Self> {
        Ok(Self {
            id: raw.id,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            doc: serde_json::from_value(raw.body)?,
        })
    }
}

/// Format check for client-supplied references. Existence is not checked.
pub fn parse_id(value: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| StorageError::InvalidIdentifier(format!("Invalid {} id", what)))
}

pub fn parse_ids(values: &[String], what: &str) -> Result<Vec<Uuid>> {
    values.iter().map(|v| parse_id(v, what)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_malformed_values() {
        let err = parse_id("not-an-id", "club").unwrap_err();
        assert_eq!(err.to_string(), "Invalid club id");
    }

    #[test]
    fn parse_id_accepts_surrounding_whitespace() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&format!(" {} ", id), "club").unwrap(), id);
    }

    #[test]
    fn only_materials_carry_an_exclusive_flag() {
        for collection in Collection::ALL {
            let expected = matches!(collection, Collection::Materials);
            assert_eq!(collection.exclusive_flag().is_some(), expected);
        }
    }

    #[test]
    fn null_fields_read_as_missing() {
        let raw = RawDocument {
            id: Uuid::new_v4(),
            body: serde_json::json!({ "club": null, "isMain": true }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(raw.field("club").is_none());
        assert!(raw.flag("isMain"));
        assert!(!raw.flag("missing"));
    }
}
