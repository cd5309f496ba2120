use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentStore, claims_exclusive_flag};
use crate::document::{Collection, RawDocument};
use crate::error::{Result, StorageError};
use crate::query::{Lookup, QueryPage, QueryPlan, memory};

#[derive(Debug, Default)]
struct Tables(HashMap<Collection, BTreeMap<Uuid, RawDocument>>);

impl Tables {
    fn table(&self, collection: Collection) -> Option<&BTreeMap<Uuid, RawDocument>> {
        self.0.get(&collection)
    }

    fn table_mut(&mut self, collection: Collection) -> &mut BTreeMap<Uuid, RawDocument> {
        self.0.entry(collection).or_default()
    }

    fn check_unique(&self, collection: Collection, id: Uuid, body: &Value) -> Result<()> {
        let Some(table) = self.table(collection) else {
            return Ok(());
        };

        for field in collection.unique_fields() {
            let Some(value) = body.get(*field).filter(|v| !v.is_null()) else {
                continue;
            };
            if table
                .values()
                .any(|doc| doc.id != id && doc.field(field) == Some(value))
            {
                return Err(StorageError::ConstraintViolation(
                    collection.duplicate_message(),
                ));
            }
        }
        Ok(())
    }

    fn clear_flag(&mut self, collection: Collection, flag: &str, keep: Uuid) -> usize {
        let now = Utc::now();
        let mut cleared = 0;
        for doc in self.table_mut(collection).values_mut() {
            if doc.id != keep && doc.flag(flag) {
                if let Some(object) = doc.body.as_object_mut() {
                    object.insert(flag.to_string(), Value::Bool(false));
                }
                doc.updated_at = now;
                cleared += 1;
            }
        }
        cleared
    }
}

impl Lookup for Tables {
    fn lookup(&self, collection: Collection, id: Uuid) -> Option<&RawDocument> {
        self.table(collection)?.get(&id)
    }
}

/// In-process store. Every write happens under one write lock, which also
/// carries the exclusive-flag and uniqueness rules. Plans are executed
/// application-side.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    tables: RwLock<Tables>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn migrate(&self) -> Result<()> {
        let mut tables = self.tables.write().await;
        for collection in Collection::ALL {
            tables.table_mut(collection);
        }
        Ok(())
    }

    async fn insert(&self, collection: Collection, body: Value) -> Result<RawDocument> {
        let id = Uuid::new_v4();
        let mut tables = self.tables.write().await;
        tables.check_unique(collection, id, &body)?;

        if let Some(flag) = claims_exclusive_flag(collection, &body) {
            let cleared = tables.clear_flag(collection, flag, id);
            tracing::debug!(%collection, flag, cleared, "Cleared exclusive flag");
        }

        // Strictly increasing creation times keep the default order exact.
        let mut now = Utc::now();
        if let Some(latest) = tables
            .table(collection)
            .and_then(|t| t.values().map(|d| d.created_at).max())
            && latest >= now
        {
            now = latest + chrono::Duration::microseconds(1);
        }

        let doc = RawDocument {
            id,
            body,
            created_at: now,
            updated_at: now,
        };
        tables.table_mut(collection).insert(id, doc.clone());

        Ok(doc)
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<RawDocument>> {
        let tables = self.tables.read().await;
        Ok(tables.lookup(collection, id).cloned())
    }

    async fn find_by_ids(&self, collection: Collection, ids: &[Uuid]) -> Result<Vec<RawDocument>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.lookup(collection, *id).cloned())
            .collect())
    }

    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        body: Value,
    ) -> Result<Option<RawDocument>> {
        let mut tables = self.tables.write().await;
        if tables.lookup(collection, id).is_none() {
            return Ok(None);
        }
        tables.check_unique(collection, id, &body)?;

        if let Some(flag) = claims_exclusive_flag(collection, &body) {
            let cleared = tables.clear_flag(collection, flag, id);
            tracing::debug!(%collection, flag, cleared, "Cleared exclusive flag");
        }

        let Some(doc) = tables.table_mut(collection).get_mut(&id) else {
            return Ok(None);
        };
        doc.body = body;
        doc.updated_at = Utc::now();

        Ok(Some(doc.clone()))
    }

    async fn modify(
        &self,
        collection: Collection,
        id: Uuid,
        apply: &(dyn for<'v> Fn(&'v mut Value) -> Result<()> + Send + Sync),
    ) -> Result<Option<RawDocument>> {
        let mut tables = self.tables.write().await;
        let Some(current) = tables.lookup(collection, id) else {
            return Ok(None);
        };
        let mut body = current.body.clone();
        apply(&mut body)?;
        tables.check_unique(collection, id, &body)?;

        if let Some(flag) = claims_exclusive_flag(collection, &body) {
            let cleared = tables.clear_flag(collection, flag, id);
            tracing::debug!(%collection, flag, cleared, "Cleared exclusive flag");
        }

        let Some(doc) = tables.table_mut(collection).get_mut(&id) else {
            return Ok(None);
        };
        doc.body = body;
        doc.updated_at = Utc::now();

        Ok(Some(doc.clone()))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.table_mut(collection).remove(&id).is_some())
    }

    async fn query(&self, collection: Collection, plan: &QueryPlan) -> Result<QueryPage> {
        let tables = self.tables.read().await;
        let Some(table) = tables.table(collection) else {
            return Ok(QueryPage::default());
        };

        Ok(memory::execute(table.values(), plan, &*tables))
    }
}
