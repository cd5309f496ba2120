pub mod club;
pub mod competition;
pub mod content;
pub mod material;
pub mod player;
pub mod schedule;
pub mod user;

use std::collections::HashMap;
use std::marker::PhantomData;

use uuid::Uuid;

use crate::document::{Document, Stored};
use crate::error::{Result, StorageError};
use crate::query::{self, ListParams, Listing, Predicate, QueryPlan};
use crate::store::DocumentStore;

/// A decoded page plus the size of the whole filtered set.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<Stored<T>>,
    pub total: u64,
}

/// Typed access to one collection.
pub struct Repository<'a, T> {
    store: &'a dyn DocumentStore,
    _marker: PhantomData<T>,
}

impl<'a, T: Document> Repository<'a, T> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Stored<T>> {
        self.find_optional(id)
            .await?
            .ok_or(StorageError::NotFound(T::COLLECTION))
    }

    pub async fn find_optional(&self, id: Uuid) -> Result<Option<Stored<T>>> {
        self.store
            .find_by_id(T::COLLECTION, id)
            .await?
            .map(Stored::decode)
            .transpose()
    }

    /// Resolves a list of references, keeping the given order and dropping
    /// ids that no longer exist.
    pub async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Stored<T>>> {
        let mut found = self.find_map(ids).await?;
        Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
    }

    /// Existing documents among `ids`, keyed by id.
    pub async fn find_map(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Stored<T>>> {
        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        self.store
            .find_by_ids(T::COLLECTION, &unique)
            .await?
            .into_iter()
            .map(|raw| Stored::decode(raw).map(|s| (s.id, s)))
            .collect()
    }

    pub async fn find_one(&self, predicate: Predicate) -> Result<Option<Stored<T>>> {
        self.store
            .find_one(T::COLLECTION, predicate)
            .await?
            .map(Stored::decode)
            .transpose()
    }

    pub async fn create(&self, doc: &T) -> Result<Stored<T>> {
        let raw = self
            .store
            .insert(T::COLLECTION, serde_json::to_value(doc)?)
            .await?;
        tracing::info!(collection = %T::COLLECTION, id = %raw.id, "Created document");
        Stored::decode(raw)
    }

    pub async fn replace(&self, id: Uuid, doc: &T) -> Result<Stored<T>> {
        let raw = self
            .store
            .replace(T::COLLECTION, id, serde_json::to_value(doc)?)
            .await?
            .ok_or(StorageError::NotFound(T::COLLECTION))?;
        tracing::info!(collection = %T::COLLECTION, %id, "Replaced document");
        Stored::decode(raw)
    }

    /// Applies `change` to the stored document inside a single write.
    pub async fn modify<F>(&self, id: Uuid, change: F) -> Result<Stored<T>>
    where
        F: Fn(&mut T) + Send + Sync,
    {
        let apply = |body: &mut serde_json::Value| -> Result<()> {
            let mut doc: T = serde_json::from_value(body.take())?;
            change(&mut doc);
            *body = serde_json::to_value(&doc)?;
            Ok(())
        };
        let raw = self
            .store
            .modify(T::COLLECTION, id, &apply)
            .await?
            .ok_or(StorageError::NotFound(T::COLLECTION))?;
        tracing::info!(collection = %T::COLLECTION, %id, "Modified document");
        Stored::decode(raw)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete(T::COLLECTION, id).await? {
            return Err(StorageError::NotFound(T::COLLECTION));
        }
        tracing::info!(collection = %T::COLLECTION, %id, "Deleted document");
        Ok(())
    }

    pub async fn query(&self, plan: &QueryPlan) -> Result<Page<T>> {
        let page = self.store.query(T::COLLECTION, plan).await?;
        Ok(Page {
            items: page
                .documents
                .into_iter()
                .map(Stored::decode)
                .collect::<Result<_>>()?,
            total: page.total,
        })
    }

    /// Every document, newest first.
    pub async fn all(&self) -> Result<Vec<Stored<T>>> {
        Ok(self.query(&QueryPlan::all()).await?.items)
    }
}

impl<'a, T: Listing> Repository<'a, T> {
    /// Filters, sorts and pages with the entity's own listing rules.
    pub async fn list(&self, params: &ListParams) -> Result<Page<T>> {
        let plan = query::plan::<T>(params)?;
        self.query(&plan).await
    }
}
