use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::document::{Collection, RawDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Number,
    Time,
}

/// What is read from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    CreatedAt,
    Text(&'static str),
    Number(&'static str),
    Time(&'static str),
    /// Number of elements of an array field.
    Length(&'static str),
    /// `firstName lastName` of a person document.
    DisplayName,
}

impl Projection {
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Text(_) | Self::DisplayName => ValueKind::Text,
            Self::Number(_) | Self::Length(_) => ValueKind::Number,
            Self::CreatedAt | Self::Time(_) => ValueKind::Time,
        }
    }

    fn extract(self, doc: &RawDocument) -> SortKey {
        match self {
            Self::CreatedAt => SortKey::Time(doc.created_at),
            Self::Text(field) => doc.field(field).map_or(SortKey::Missing, text_key),
            Self::Number(field) => doc.field(field).map_or(SortKey::Missing, number_key),
            Self::Time(field) => doc
                .field(field)
                .and_then(Value::as_str)
                .and_then(parse_time)
                .map_or(SortKey::Missing, SortKey::Time),
            Self::Length(field) => doc
                .field(field)
                .and_then(Value::as_array)
                .map_or(SortKey::Missing, |items| SortKey::Number(items.len() as f64)),
            Self::DisplayName => {
                let name = ["firstName", "lastName"]
                    .iter()
                    .filter_map(|f| doc.field(f).and_then(Value::as_str))
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                if name.is_empty() {
                    SortKey::Missing
                } else {
                    SortKey::Text(name)
                }
            }
        }
    }
}

/// Where the projected value lives: on the document itself, or on the
/// document referenced by the `via` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Own,
    Related {
        via: &'static str,
        collection: Collection,
    },
}

/// A typed, closed description of one filterable or sortable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessor {
    pub source: Source,
    pub projection: Projection,
}

impl Accessor {
    pub const CREATED_AT: Accessor = Accessor::own(Projection::CreatedAt);

    pub const fn own(projection: Projection) -> Self {
        Self {
            source: Source::Own,
            projection,
        }
    }

    pub const fn related(
        via: &'static str,
        collection: Collection,
        projection: Projection,
    ) -> Self {
        Self {
            source: Source::Related { via, collection },
            projection,
        }
    }

    pub const fn text(field: &'static str) -> Self {
        Self::own(Projection::Text(field))
    }

    pub const fn number(field: &'static str) -> Self {
        Self::own(Projection::Number(field))
    }

    pub const fn time(field: &'static str) -> Self {
        Self::own(Projection::Time(field))
    }

    pub fn kind(&self) -> ValueKind {
        self.projection.kind()
    }

    pub fn extract(&self, doc: &RawDocument, lookup: &dyn Lookup) -> SortKey {
        match self.source {
            Source::Own => self.projection.extract(doc),
            Source::Related { via, collection } => doc
                .field(via)
                .and_then(Value::as_str)
                .and_then(|id| Uuid::parse_str(id).ok())
                .and_then(|id| lookup.lookup(collection, id))
                .map_or(SortKey::Missing, |related| self.projection.extract(related)),
        }
    }
}

/// Resolves references while evaluating a plan in memory.
pub trait Lookup {
    fn lookup(&self, collection: Collection, id: Uuid) -> Option<&RawDocument>;
}

/// For plans without related accessors.
pub struct NoRelations;

impl Lookup for NoRelations {
    fn lookup(&self, _collection: Collection, _id: Uuid) -> Option<&RawDocument> {
        None
    }
}

/// An extracted value, ordered the same way the SQL rendering orders it:
/// missing values first, numbers and times naturally, text byte-wise.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Missing,
    Number(f64),
    Time(DateTime<Utc>),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Number(_) => 1,
            Self::Time(_) => 2,
            Self::Text(_) => 3,
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Time(a), Self::Time(b)) => a.cmp(b),
            // Not locale-aware: plain byte order, matching COLLATE "C".
            (Self::Text(a), Self::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Equality against a client-supplied string, interpreted by kind.
    pub fn matches_text(&self, value: &str) -> bool {
        match self {
            Self::Missing => false,
            Self::Text(s) => s == value,
            Self::Number(n) => value.trim().parse::<f64>().is_ok_and(|v| v == *n),
            Self::Time(t) => parse_time(value).is_some_and(|v| v == *t),
        }
    }
}

fn text_key(value: &Value) -> SortKey {
    match value {
        Value::String(s) => SortKey::Text(s.clone()),
        Value::Number(n) => SortKey::Text(n.to_string()),
        Value::Bool(b) => SortKey::Text(b.to_string()),
        _ => SortKey::Missing,
    }
}

fn number_key(value: &Value) -> SortKey {
    match value {
        Value::Number(n) => n.as_f64().map_or(SortKey::Missing, SortKey::Number),
        Value::String(s) => s.trim().parse().map_or(SortKey::Missing, SortKey::Number),
        _ => SortKey::Missing,
    }
}

/// Accepts RFC 3339 instants, naive date-times and plain dates (UTC).
pub fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(t.and_utc());
    }
    parse_date(value)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn doc(body: Value) -> RawDocument {
        RawDocument {
            id: Uuid::new_v4(),
            body,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct Related(HashMap<Uuid, RawDocument>);

    impl Lookup for Related {
        fn lookup(&self, _collection: Collection, id: Uuid) -> Option<&RawDocument> {
            self.0.get(&id)
        }
    }

    #[test]
    fn text_ordering_is_bytewise() {
        let upper = SortKey::Text("Zenit".into());
        let lower = SortKey::Text("ajax".into());
        assert_eq!(upper.compare(&lower), Ordering::Less);
    }

    #[test]
    fn missing_sorts_before_values() {
        assert_eq!(SortKey::Missing.compare(&SortKey::Number(-1.0)), Ordering::Less);
        assert_eq!(SortKey::Text("a".into()).compare(&SortKey::Missing), Ordering::Greater);
    }

    #[test]
    fn related_display_name_is_resolved_through_the_reference() {
        let author = doc(json!({ "firstName": "Ada", "lastName": "Lovelace" }));
        let material = doc(json!({ "author": author.id.to_string() }));
        let lookup = Related(HashMap::from([(author.id, author)]));

        let accessor =
            Accessor::related("author", Collection::Users, Projection::DisplayName);
        assert_eq!(
            accessor.extract(&material, &lookup),
            SortKey::Text("Ada Lovelace".into())
        );
    }

    #[test]
    fn empty_name_parts_are_skipped() {
        let accessor = Accessor::own(Projection::DisplayName);

        let surname_only = doc(json!({ "firstName": "", "lastName": "Lovelace" }));
        assert_eq!(
            accessor.extract(&surname_only, &NoRelations),
            SortKey::Text("Lovelace".into())
        );
        let blank = doc(json!({ "firstName": "", "lastName": "" }));
        assert_eq!(accessor.extract(&blank, &NoRelations), SortKey::Missing);
    }

    #[test]
    fn dangling_reference_extracts_missing() {
        let material = doc(json!({ "author": Uuid::new_v4().to_string() }));
        let accessor =
            Accessor::related("author", Collection::Users, Projection::DisplayName);
        assert_eq!(accessor.extract(&material, &NoRelations), SortKey::Missing);
    }

    #[test]
    fn length_projection_counts_array_elements() {
        let material = doc(json!({ "likes": ["a", "b", "c"] }));
        assert_eq!(
            Accessor::own(Projection::Length("likes")).extract(&material, &NoRelations),
            SortKey::Number(3.0)
        );
    }

    #[test]
    fn parse_time_accepts_dates_and_instants() {
        assert!(parse_time("2024-05-01").is_some());
        assert!(parse_time("2024-05-01T10:00:00Z").is_some());
        assert!(parse_time("2024-05-01T10:00:00").is_some());
        assert!(parse_time("yesterday").is_none());
    }
}
