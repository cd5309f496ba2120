pub mod document;
pub mod dto;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod services;
pub mod store;

use std::sync::Arc;

use error::Result;
use store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};

/// Handle to the document store shared by every request.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl Database {
    /// Connect to Postgres. Plans are executed store-side.
    pub async fn new(database_url: &str) -> Result<Self> {
        let store = PgDocumentStore::connect(database_url).await?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// Process-local store. Plans are executed application-side.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryDocumentStore::new()),
        }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        self.store.migrate().await
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
