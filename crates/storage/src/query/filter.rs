use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::QueryError;
use super::accessor::{Accessor, Lookup, parse_date, parse_time};
use crate::document::RawDocument;

/// Client-supplied filter values keyed by field name.
///
/// Empty values mean "no constraint on this field" and are pruned on
/// construction, so no empty string ever reaches a predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams(BTreeMap<String, String>);

impl FilterParams {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(_, v)| !v.trim().is_empty())
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.0.insert(key.into(), value);
        }
    }

    /// The inclusive `dateFrom`..=`dateTo` range.
    ///
    /// Both bounds are required: a lone bound yields `None` and the range is
    /// not applied. A date-only `dateTo` covers that whole day.
    pub fn date_range(&self) -> Result<Option<DateRange>, QueryError> {
        let (Some(from), Some(to)) = (self.get("dateFrom"), self.get("dateTo")) else {
            return Ok(None);
        };

        let from = parse_time(from).ok_or_else(|| QueryError::InvalidDate {
            field: "dateFrom".to_string(),
            value: from.to_string(),
        })?;
        let to = match parse_date(to) {
            Some(day) => day
                .and_hms_nano_opt(23, 59, 59, 999_999_999)
                .map(|t| t.and_utc()),
            None => parse_time(to),
        }
        .ok_or_else(|| QueryError::InvalidDate {
            field: "dateTo".to_string(),
            value: to.to_string(),
        })?;

        Ok(Some(DateRange { from, to }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.from <= t && t <= self.to
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Equals { accessor: Accessor, value: String },
    Between { accessor: Accessor, range: DateRange },
    /// Case-insensitive substring match.
    Contains { accessor: Accessor, needle: String },
    OneOf { accessor: Accessor, values: Vec<String> },
    /// Some string of the array field contains the needle, case-insensitively.
    ElementContains { field: &'static str, needle: String },
}

impl Condition {
    pub fn matches(&self, doc: &RawDocument, lookup: &dyn Lookup) -> bool {
        match self {
            Self::Equals { accessor, value } => accessor.extract(doc, lookup).matches_text(value),
            Self::Between { accessor, range } => accessor
                .extract(doc, lookup)
                .as_time()
                .is_some_and(|t| range.contains(t)),
            Self::Contains { accessor, needle } => accessor
                .extract(doc, lookup)
                .as_text()
                .is_some_and(|text| contains_ignore_case(text, needle)),
            Self::OneOf { accessor, values } => {
                let key = accessor.extract(doc, lookup);
                values.iter().any(|v| key.matches_text(v))
            }
            Self::ElementContains { field, needle } => {
                strings(doc, field).any(|s| contains_ignore_case(s, needle))
            }
        }
    }
}

fn strings<'a>(doc: &'a RawDocument, field: &str) -> impl Iterator<Item = &'a str> {
    doc.field(field)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A boolean combination of conditions. `All(vec![])` matches everything,
/// `Any(vec![])` matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
    Match(Condition),
}

impl Predicate {
    pub fn always() -> Self {
        Self::All(Vec::new())
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Self::All(parts) if parts.is_empty())
    }

    pub fn and(self, other: Predicate) -> Self {
        match (self, other) {
            (a, b) if a.is_always() => b,
            (a, b) if b.is_always() => a,
            (Self::All(mut parts), b) => {
                parts.push(b);
                Self::All(parts)
            }
            (a, b) => Self::All(vec![a, b]),
        }
    }

    pub fn equals(accessor: Accessor, value: impl Into<String>) -> Self {
        Self::Match(Condition::Equals {
            accessor,
            value: value.into(),
        })
    }

    pub fn contains(accessor: Accessor, needle: impl Into<String>) -> Self {
        Self::Match(Condition::Contains {
            accessor,
            needle: needle.into(),
        })
    }

    pub fn matches(&self, doc: &RawDocument, lookup: &dyn Lookup) -> bool {
        match self {
            Self::All(parts) => parts.iter().all(|p| p.matches(doc, lookup)),
            Self::Any(parts) => parts.iter().any(|p| p.matches(doc, lookup)),
            Self::Match(condition) => condition.matches(doc, lookup),
        }
    }
}

/// Builds the conjunction for one entity's recognized filter fields.
pub struct PredicateBuilder<'a> {
    filter: &'a FilterParams,
    parts: Vec<Predicate>,
}

impl<'a> PredicateBuilder<'a> {
    pub fn new(filter: &'a FilterParams) -> Self {
        Self {
            filter,
            parts: Vec::new(),
        }
    }

    pub fn equals(mut self, key: &str, accessor: Accessor) -> Self {
        if let Some(value) = self.filter.get(key) {
            self.parts.push(Predicate::equals(accessor, value));
        }
        self
    }

    pub fn date_range(mut self, accessor: Accessor) -> Result<Self, QueryError> {
        if let Some(range) = self.filter.date_range()? {
            self.parts
                .push(Predicate::Match(Condition::Between { accessor, range }));
        }
        Ok(self)
    }

    pub fn build(self) -> Predicate {
        Predicate::All(self.parts)
    }
}
