use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::QueryError;
use super::accessor::{Accessor, Lookup, SortKey};
use crate::document::RawDocument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC NULLS FIRST",
            Self::Desc => "DESC NULLS LAST",
        }
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(QueryError::UnknownOrder(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: Accessor,
    pub order: SortOrder,
}

impl Default for Sort {
    /// Newest first.
    fn default() -> Self {
        Self {
            key: Accessor::CREATED_AT,
            order: SortOrder::Desc,
        }
    }
}

impl Sort {
    pub fn new(key: Accessor, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn compare(&self, a: &SortKey, b: &SortKey) -> Ordering {
        match self.order {
            SortOrder::Asc => a.compare(b),
            SortOrder::Desc => b.compare(a),
        }
    }

    /// Orders documents in place.
    ///
    /// Documents are first put in base order (newest first, then id
    /// descending) and then stably sorted by key, so equal keys keep the same
    /// relative order on every run and in both store strategies.
    pub fn apply(&self, docs: &mut Vec<RawDocument>, lookup: &dyn Lookup) {
        docs.sort_by(base_order);

        let mut keyed: Vec<(SortKey, RawDocument)> = docs
            .drain(..)
            .map(|doc| (self.key.extract(&doc, lookup), doc))
            .collect();
        // `sort_by` is stable.
        keyed.sort_by(|(a, _), (b, _)| self.compare(a, b));

        docs.extend(keyed.into_iter().map(|(_, doc)| doc));
    }
}

pub fn base_order(a: &RawDocument, b: &RawDocument) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::NoRelations;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use uuid::Uuid;

    fn docs(views: &[i64]) -> Vec<RawDocument> {
        let start = Utc::now();
        views
            .iter()
            .enumerate()
            .map(|(i, v)| RawDocument {
                id: Uuid::new_v4(),
                body: json!({ "views": v, "n": i }),
                created_at: start + Duration::seconds(i as i64),
                updated_at: start,
            })
            .collect()
    }

    fn order_of(docs: &[RawDocument]) -> Vec<i64> {
        docs.iter().map(|d| d.body["n"].as_i64().unwrap()).collect()
    }

    #[test]
    fn default_sort_is_newest_first() {
        let mut items = docs(&[1, 2, 3]);
        Sort::default().apply(&mut items, &NoRelations);
        assert_eq!(order_of(&items), vec![2, 1, 0]);
    }

    #[test]
    fn asc_and_desc_are_exact_reverses_for_unique_keys() {
        let mut asc = docs(&[40, 10, 30, 20]);
        let mut desc = asc.clone();

        Sort::new(Accessor::number("views"), SortOrder::Asc).apply(&mut asc, &NoRelations);
        Sort::new(Accessor::number("views"), SortOrder::Desc).apply(&mut desc, &NoRelations);

        let mut reversed = order_of(&desc);
        reversed.reverse();
        assert_eq!(order_of(&asc), reversed);
        assert_eq!(order_of(&asc), vec![1, 3, 2, 0]);
    }

    #[test]
    fn equal_keys_keep_base_order_regardless_of_input_order() {
        let mut first = docs(&[5, 5, 5, 1]);
        let mut second = first.clone();
        second.reverse();

        let sort = Sort::new(Accessor::number("views"), SortOrder::Desc);
        sort.apply(&mut first, &NoRelations);
        sort.apply(&mut second, &NoRelations);

        assert_eq!(order_of(&first), vec![2, 1, 0, 3]);
        assert_eq!(order_of(&first), order_of(&second));
    }

    #[test]
    fn order_parsing_is_closed() {
        assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
