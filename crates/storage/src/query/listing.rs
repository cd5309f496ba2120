use super::accessor::Accessor;
use super::filter::{FilterParams, Predicate};
use super::params::ListParams;
use super::sort::{Sort, SortOrder};
use super::{QueryError, QueryPlan};
use crate::document::Document;

/// A closed set of sort indicators for one entity kind.
pub trait SortIndicator: Sized + Copy + 'static {
    /// Client-facing names, matched exactly.
    const NAMES: &'static [(&'static str, Self)];

    fn accessor(self) -> Accessor;

    fn parse(name: &str) -> Result<Self, QueryError> {
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name.trim())
            .map(|(_, indicator)| *indicator)
            .ok_or_else(|| QueryError::UnknownIndicator(name.to_string()))
    }
}

/// The per-entity accessor table plugged into the generic planner.
pub trait Listing: Document {
    type Indicator: SortIndicator;

    /// Recognized filter keys; anything else is ignored.
    const FILTER_FIELDS: &'static [&'static str];

    fn predicate(filter: &FilterParams) -> Result<Predicate, QueryError>;
}

/// Turns list parameters into a plan for entity `L`.
///
/// Absent sort data means newest first; an indicator without an order sorts
/// descending.
pub fn plan<L: Listing>(params: &ListParams) -> Result<QueryPlan, QueryError> {
    for (key, _) in params.filter.iter() {
        if !L::FILTER_FIELDS.contains(&key) {
            tracing::debug!(collection = %L::COLLECTION, key, "Ignoring unknown filter key");
        }
    }

    let predicate = L::predicate(&params.filter)?;

    let order = params
        .sort
        .order
        .as_deref()
        .map(str::parse::<SortOrder>)
        .transpose()?
        .unwrap_or_default();
    let key = params
        .sort
        .indicator
        .as_deref()
        .map(L::Indicator::parse)
        .transpose()?
        .map_or(Accessor::CREATED_AT, SortIndicator::accessor);

    let plan = QueryPlan {
        predicate,
        sort: Sort::new(key, order),
        window: params.window,
    };
    tracing::debug!(collection = %L::COLLECTION, ?plan, "Planned list query");

    Ok(plan)
}
