//! Document store: named collections of JSON objects keyed by a sequential `id`.

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;

pub type Document = Map<String, JsonValue>;

/// Name of the application-level identifier stored inside every document.
pub const ID_FIELD: &str = "id";

/// Conjunction of field equalities. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: i64) -> Self {
        Self::new().eq(ID_FIELD, id)
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn conditions(&self) -> &Document {
        &self.0
    }

    /// Filter as a JSON object, for stores that match by containment.
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.0.clone())
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.0.iter().all(|(field, expected)| {
            doc.get(field)
                .map(|actual| crate::domain::json::json_eq(actual, expected))
                .unwrap_or(false)
        })
    }
}

/// Offset/limit window over a result set in insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    /// `None` returns everything after `skip`.
    pub limit: Option<u64>,
}

impl Window {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn page(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: Some(limit),
        }
    }
}

/// Async contract every backing store implements.
///
/// Results are always in insertion order. `insert*` assign the document's `id`
/// from a per-collection counter that starts at 0 and never hands out the same
/// value twice, even after deletes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates whatever tables/indexes the store needs. Idempotent.
    async fn init(&self) -> anyhow::Result<()>;

    /// Cheap round-trip used by health checks.
    async fn ping(&self) -> anyhow::Result<()>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> anyhow::Result<Option<Document>>;

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        window: Window,
    ) -> anyhow::Result<Vec<Document>>;

    async fn count(&self, collection: &str) -> anyhow::Result<u64>;

    /// Inserts `doc` under a freshly assigned id and returns the stored document.
    async fn insert(&self, collection: &str, doc: Document) -> anyhow::Result<Document>;

    /// Like `insert`, but only if no document matches `guard`. The check and the
    /// write are atomic with respect to other writers on the same collection.
    ///
    /// Returns `None` when a matching document already exists.
    async fn insert_unless_exists(
        &self,
        collection: &str,
        guard: &Filter,
        doc: Document,
    ) -> anyhow::Result<Option<Document>>;

    /// Sets `fields` on the first document matching `filter`, leaving other
    /// fields untouched. Returns the updated document, or `None` if nothing matched.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        fields: Document,
    ) -> anyhow::Result<Option<Document>>;

    /// Removes the first document matching `filter`. Returns whether one was removed.
    async fn delete_one(&self, collection: &str, filter: &Filter) -> anyhow::Result<bool>;
}
