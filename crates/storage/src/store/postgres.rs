use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use super::{DocumentStore, claims_exclusive_flag};
use crate::document::{Collection, RawDocument};
use crate::error::{Result, StorageError};
use crate::query::{QueryPage, QueryPlan, sql};

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    doc: Json<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for RawDocument {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            body: row.doc.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres-backed store. Plans are rendered to SQL and executed by the
/// database: one query for the page, one for the count.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }
}

/// Partial unique index backing the exclusive flag. Writers hold
/// [`lock_flag`], so a violation surfaces as a database error.
const EXCLUSIVE_FLAG_INDEX: &str = "materials_single_main";

/// Holds the collection's flag lock until the transaction ends. Must be taken
/// before any row lock.
async fn lock_flag(conn: &mut PgConnection, collection: Collection, flag: &str) -> Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(format!("{}.{}", collection.table(), flag))
        .execute(conn)
        .await?;
    Ok(())
}

/// Sets the exclusive flag to `false` on every document but `keep`.
async fn clear_flag(
    conn: &mut PgConnection,
    collection: Collection,
    flag: &str,
    keep: Uuid,
) -> Result<u64> {
    let query = format!(
        "UPDATE {} SET doc = jsonb_set(doc, $1, 'false'::jsonb), updated_at = now() \
         WHERE id <> $2 AND doc->>'{}' = 'true'",
        collection.table(),
        flag
    );
    let result = sqlx::query(&query)
        .bind(vec![flag.to_string()])
        .bind(keep)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

fn write_error(collection: Collection, error: sqlx::Error) -> StorageError {
    let error = StorageError::from(error);
    if error.is_unique_violation() && !error.violates(EXCLUSIVE_FLAG_INDEX) {
        StorageError::ConstraintViolation(collection.duplicate_message())
    } else {
        error
    }
}

#[async_trait::async_trait]
impl DocumentStore for PgDocumentStore {
    async fn migrate(&self) -> Result<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, collection: Collection, body: Value) -> Result<RawDocument> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        if let Some(flag) = claims_exclusive_flag(collection, &body) {
            lock_flag(&mut tx, collection, flag).await?;
            let cleared = clear_flag(&mut tx, collection, flag, id).await?;
            tracing::debug!(%collection, flag, cleared, "Cleared exclusive flag");
        }

        let query = format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2) RETURNING id, doc, created_at, updated_at",
            collection.table()
        );
        let row: DocumentRow = sqlx::query_as(&query)
            .bind(id)
            .bind(Json(body))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| write_error(collection, e))?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<RawDocument>> {
        let query = format!(
            "SELECT {} FROM {} d WHERE d.id = $1",
            sql::COLUMNS,
            collection.table()
        );
        let row: Option<DocumentRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(RawDocument::from))
    }

    async fn find_by_ids(&self, collection: Collection, ids: &[Uuid]) -> Result<Vec<RawDocument>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {} FROM {} d WHERE d.id = ANY($1)",
            sql::COLUMNS,
            collection.table()
        );
        let rows: Vec<DocumentRow> = sqlx::query_as(&query)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(RawDocument::from).collect())
    }

    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        body: Value,
    ) -> Result<Option<RawDocument>> {
        let mut tx = self.pool.begin().await?;

        if let Some(flag) = claims_exclusive_flag(collection, &body) {
            lock_flag(&mut tx, collection, flag).await?;
            let cleared = clear_flag(&mut tx, collection, flag, id).await?;
            tracing::debug!(%collection, flag, cleared, "Cleared exclusive flag");
        }

        let query = format!(
            "UPDATE {} SET doc = $2, updated_at = now() WHERE id = $1 \
             RETURNING id, doc, created_at, updated_at",
            collection.table()
        );
        let row: Option<DocumentRow> = sqlx::query_as(&query)
            .bind(id)
            .bind(Json(body))
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| write_error(collection, e))?;

        // Nothing to replace: leave the other documents untouched.
        if row.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;

        Ok(row.map(RawDocument::from))
    }

    async fn modify(
        &self,
        collection: Collection,
        id: Uuid,
        apply: &(dyn for<'v> Fn(&'v mut Value) -> Result<()> + Send + Sync),
    ) -> Result<Option<RawDocument>> {
        let mut tx = self.pool.begin().await?;

        // Same lock order as the flag writers.
        if let Some(flag) = collection.exclusive_flag() {
            lock_flag(&mut tx, collection, flag).await?;
        }

        let query = format!(
            "SELECT {} FROM {} d WHERE d.id = $1 FOR UPDATE",
            sql::COLUMNS,
            collection.table()
        );
        let row: Option<DocumentRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        let mut body = row.doc.0;
        apply(&mut body)?;

        if let Some(flag) = claims_exclusive_flag(collection, &body) {
            let cleared = clear_flag(&mut tx, collection, flag, id).await?;
            tracing::debug!(%collection, flag, cleared, "Cleared exclusive flag");
        }

        let query = format!(
            "UPDATE {} SET doc = $2, updated_at = now() WHERE id = $1 \
             RETURNING id, doc, created_at, updated_at",
            collection.table()
        );
        let row: DocumentRow = sqlx::query_as(&query)
            .bind(id)
            .bind(Json(body))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| write_error(collection, e))?;

        tx.commit().await?;

        Ok(Some(row.into()))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool> {
        let query = format!("DELETE FROM {} WHERE id = $1", collection.table());
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    async fn query(&self, collection: Collection, plan: &QueryPlan) -> Result<QueryPage> {
        let total = sql::count(collection, &plan.predicate)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let rows: Vec<DocumentRow> = sql::select(collection, plan)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        Ok(QueryPage {
            documents: rows.into_iter().map(RawDocument::from).collect(),
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Accessor, Predicate};
    use serde_json::json;

    /// Runs against `DATABASE_URL` when it is set; skipped otherwise.
    async fn store() -> Option<PgDocumentStore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let store = PgDocumentStore::connect(&url).await.unwrap();
        store.migrate().await.unwrap();
        Some(store)
    }

    async fn mains(store: &PgDocumentStore) -> u64 {
        store
            .query(
                Collection::Materials,
                &QueryPlan::new(Predicate::equals(Accessor::text("isMain"), "true")),
            )
            .await
            .unwrap()
            .total
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_main_writers_all_succeed() {
        let Some(store) = store().await else {
            return;
        };

        let writers: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(Collection::Materials, json!({ "title": i, "isMain": true }))
                        .await
                })
            })
            .collect();
        for writer in writers {
            let written = writer.await.unwrap();
            assert!(written.is_ok(), "{:?}", written.err());
        }

        assert_eq!(mains(&store).await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn likes_never_restore_a_replaced_main() {
        let Some(store) = store().await else {
            return;
        };
        let old_main = store
            .insert(Collection::Materials, json!({ "isMain": true, "likes": [] }))
            .await
            .unwrap()
            .id;

        let likers: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let user = Uuid::new_v4().to_string();
                tokio::spawn(async move {
                    store
                        .modify(Collection::Materials, old_main, &move |body: &mut Value| {
                            if let Some(likes) = body["likes"].as_array_mut() {
                                likes.push(Value::from(user.as_str()));
                            }
                            Ok(())
                        })
                        .await
                })
            })
            .collect();
        store
            .insert(Collection::Materials, json!({ "isMain": true, "likes": [] }))
            .await
            .unwrap();
        for liker in likers {
            assert!(liker.await.unwrap().unwrap().is_some());
        }

        let old_main = store
            .find_by_id(Collection::Materials, old_main)
            .await
            .unwrap()
            .unwrap();
        assert!(!old_main.flag("isMain"));
        assert_eq!(old_main.body["likes"].as_array().map(Vec::len), Some(8));
        assert_eq!(mains(&store).await, 1);
    }
}
