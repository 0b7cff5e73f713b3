//! Persistent document store implementation using PostgreSQL.
//!
//! All collections share one `documents` table with JSONB bodies. A filter
//! matches when every condition key is equal (`jsonb =`, so `7` equals `7.0`)
//! to the stored value; `body @> filter` only narrows rows through the GIN
//! index. Ids come from `document_sequences`, bumped in the same transaction
//! as the insert.

use super::{Document, DocumentStore, Filter, Window, ID_FIELD};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row, Transaction};

/// A document store that uses a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("failed to connect to PostgreSQL")?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Claims the next id for `collection`. The first claim starts after the
    /// highest id already stored (or at 0), so pre-existing rows are respected.
    async fn next_id(tx: &mut Transaction<'_, Postgres>, collection: &str) -> anyhow::Result<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO document_sequences (collection, last_id)
             VALUES ($1, (SELECT COALESCE(MAX(doc_id) + 1, 0) FROM documents WHERE collection = $1))
             ON CONFLICT (collection) DO UPDATE SET last_id = document_sequences.last_id + 1
             RETURNING last_id",
        )
        .bind(collection)
        .fetch_one(tx.as_mut())
        .await?;
        Ok(id)
    }

    async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        collection: &str,
        mut doc: Document,
    ) -> anyhow::Result<Document> {
        let id = Self::next_id(tx, collection).await?;
        doc.insert(ID_FIELD.to_string(), JsonValue::from(id));
        sqlx::query("INSERT INTO documents (collection, doc_id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id)
            .bind(JsonValue::Object(doc.clone()))
            .execute(tx.as_mut())
            .await?;
        Ok(doc)
    }
}

/// Equality match of `body` against the filter bound as `$2`. Containment alone
/// would let `[1]` match a stored `[1, 2]`.
const MATCHES_FILTER: &str = "body @> $2 AND NOT EXISTS (
    SELECT 1 FROM jsonb_each($2) AS cond(key, value)
    WHERE body -> cond.key IS DISTINCT FROM cond.value
)";

fn row_to_document(row: &PgRow) -> anyhow::Result<Document> {
    let body: JsonValue = row.try_get("body")?;
    match body {
        JsonValue::Object(map) => Ok(map),
        other => Err(anyhow::anyhow!("stored document is not an object: {}", other)),
    }
}

fn to_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                seq BIGSERIAL PRIMARY KEY,
                collection TEXT NOT NULL,
                doc_id BIGINT NOT NULL,
                body JSONB NOT NULL,
                UNIQUE (collection, doc_id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS documents_body_idx ON documents USING GIN (body jsonb_path_ops)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS document_sequences (
                collection TEXT PRIMARY KEY,
                last_id BIGINT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> anyhow::Result<Option<Document>> {
        let sql = format!(
            "SELECT body FROM documents
             WHERE collection = $1 AND {}
             ORDER BY seq LIMIT 1",
            MATCHES_FILTER
        );
        let row = sqlx::query(&sql)
            .bind(collection)
            .bind(filter.to_json())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_document).transpose()
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        window: Window,
    ) -> anyhow::Result<Vec<Document>> {
        let sql = format!(
            "SELECT body FROM documents
             WHERE collection = $1 AND {}
             ORDER BY seq OFFSET $3 LIMIT $4",
            MATCHES_FILTER
        );
        let rows = sqlx::query(&sql)
            .bind(collection)
            .bind(filter.to_json())
            .bind(to_i64(window.skip))
            .bind(window.limit.map(to_i64))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_document).collect()
    }

    async fn count(&self, collection: &str) -> anyhow::Result<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(n).unwrap_or(0))
    }

    async fn insert(&self, collection: &str, doc: Document) -> anyhow::Result<Document> {
        let mut tx = self.pool.begin().await?;
        let stored = Self::insert_in_tx(&mut tx, collection, doc).await?;
        tx.commit().await?;
        Ok(stored)
    }

    async fn insert_unless_exists(
        &self,
        collection: &str,
        guard: &Filter,
        doc: Document,
    ) -> anyhow::Result<Option<Document>> {
        let mut tx = self.pool.begin().await?;

        // Serializes conditional inserts per collection until commit/rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(collection)
            .execute(tx.as_mut())
            .await?;

        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM documents WHERE collection = $1 AND {})",
            MATCHES_FILTER
        );
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(collection)
            .bind(guard.to_json())
            .fetch_one(tx.as_mut())
            .await?;
        if exists {
            tx.rollback().await?;
            return Ok(None);
        }

        let stored = Self::insert_in_tx(&mut tx, collection, doc).await?;
        tx.commit().await?;
        Ok(Some(stored))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        mut fields: Document,
    ) -> anyhow::Result<Option<Document>> {
        fields.remove(ID_FIELD);
        // The outer match is re-evaluated against a concurrently modified row,
        // so a stale match updates nothing.
        let sql = format!(
            "UPDATE documents SET body = body || $3
             WHERE seq = (
                SELECT seq FROM documents
                WHERE collection = $1 AND {0}
                ORDER BY seq LIMIT 1
             )
             AND {0}
             RETURNING body",
            MATCHES_FILTER
        );
        let row = sqlx::query(&sql)
            .bind(collection)
            .bind(filter.to_json())
            .bind(JsonValue::Object(fields))
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_document).transpose()
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> anyhow::Result<bool> {
        let sql = format!(
            "DELETE FROM documents
             WHERE seq = (
                SELECT seq FROM documents
                WHERE collection = $1 AND {}
                ORDER BY seq LIMIT 1
             )",
            MATCHES_FILTER
        );
        let result = sqlx::query(&sql)
            .bind(collection)
            .bind(filter.to_json())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
