//! Document stores.
//!
//! [`PgDocumentStore`] is the production backend and executes plans
//! store-side. [`MemoryDocumentStore`] keeps everything in process and
//! executes plans application-side; it backs tests and database-less runs.

pub mod memory;
pub mod postgres;

use serde_json::Value;
use uuid::Uuid;

use crate::document::{Collection, RawDocument};
use crate::error::Result;
use crate::query::{Predicate, QueryPage, QueryPlan};

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates the collections if they do not exist yet.
    async fn migrate(&self) -> Result<()>;

    /// Stores a new document and assigns its identity and timestamps.
    async fn insert(&self, collection: Collection, body: Value) -> Result<RawDocument>;

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<RawDocument>>;

    /// Documents whose id is in `ids`, in no particular order. Unknown ids
    /// are skipped.
    async fn find_by_ids(&self, collection: Collection, ids: &[Uuid]) -> Result<Vec<RawDocument>>;

    /// Replaces the whole body of a document. `None` when it does not exist.
    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        body: Value,
    ) -> Result<Option<RawDocument>>;

    /// Applies `apply` to the current body and writes the result back in one
    /// write, so fields the closure leaves alone keep their stored values.
    /// `None` when the document does not exist.
    async fn modify(
        &self,
        collection: Collection,
        id: Uuid,
        apply: &(dyn for<'v> Fn(&'v mut Value) -> Result<()> + Send + Sync),
    ) -> Result<Option<RawDocument>>;

    /// Returns whether a document was removed. References to it are left
    /// in place.
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool>;

    async fn query(&self, collection: Collection, plan: &QueryPlan) -> Result<QueryPage>;

    /// First document matching `predicate` in default order.
    async fn find_one(
        &self,
        collection: Collection,
        predicate: Predicate,
    ) -> Result<Option<RawDocument>> {
        let page = self
            .query(collection, &QueryPlan::new(predicate).limit(1))
            .await?;
        Ok(page.documents.into_iter().next())
    }
}

/// Whether the write sets the collection's exclusive flag.
pub(crate) fn claims_exclusive_flag(collection: Collection, body: &Value) -> Option<&'static str> {
    collection
        .exclusive_flag()
        .filter(|flag| body.get(*flag).and_then(Value::as_bool).unwrap_or(false))
}
