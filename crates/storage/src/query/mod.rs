//! Collection query planner.
//!
//! One engine serves every entity kind. A [`QueryPlan`] combines a
//! [`Predicate`], a [`Sort`] and a [`Window`]; each entity contributes only a
//! table of recognized filter fields and sort indicators through the
//! [`Listing`] trait.
//!
//! Plans are executed in two ways:
//! - store-side, rendered to SQL by [`sql`] (count and page share the same
//!   predicate);
//! - application-side, evaluated over fetched documents by [`memory`]
//!   (filter, count the filtered set, stable sort, slice).

pub mod accessor;
pub mod filter;
pub mod listing;
pub mod memory;
pub mod page;
pub mod params;
pub mod sort;
pub mod sql;

use thiserror::Error;

use crate::document::RawDocument;

pub use accessor::{Accessor, Lookup, NoRelations, Projection, SortKey, Source, ValueKind};
pub use filter::{Condition, DateRange, FilterParams, Predicate, PredicateBuilder};
pub use listing::{Listing, SortIndicator, plan};
pub use page::Window;
pub use params::{ListParams, SortParams};
pub use sort::{Sort, SortOrder};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid {field} value: {value}")]
    InvalidDate { field: String, value: String },

    #[error("Unknown sort indicator: {0}")]
    UnknownIndicator(String),

    #[error("Unknown sort order: {0}")]
    UnknownOrder(String),

    #[error("{0} must be a non-negative integer")]
    InvalidNumber(String),

    #[error("Malformed {0} parameter")]
    MalformedParameter(String),
}

/// Everything a store needs to answer one list request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub predicate: Predicate,
    pub sort: Sort,
    pub window: Window,
}

impl QueryPlan {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            sort: Sort::default(),
            window: Window::everything(),
        }
    }

    pub fn all() -> Self {
        Self::new(Predicate::always())
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    pub fn limit(self, limit: u64) -> Self {
        self.with_window(Window::new(0, limit))
    }
}

impl Default for QueryPlan {
    fn default() -> Self {
        Self::all()
    }
}

/// One page of documents plus the size of the full filtered set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPage {
    pub documents: Vec<RawDocument>,
    pub total: u64,
}
