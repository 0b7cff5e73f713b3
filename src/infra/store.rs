use crate::infra::config::{self, StoreBackend};
use crate::storage::document::{DocumentStore, InMemoryDocumentStore, PostgresDocumentStore};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

/// Opens and initializes the store selected by `STORE_BACKEND`.
pub async fn open_from_env() -> anyhow::Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config::store_backend()? {
        StoreBackend::Postgres => {
            info!("store backend: postgres");
            let url = config::database_url()?;
            let max_connections = config::db_max_connections()?;
            Arc::new(PostgresDocumentStore::connect(&url, max_connections).await?)
        }
        StoreBackend::Memory => {
            info!("store backend: memory (data is lost on exit)");
            Arc::new(InMemoryDocumentStore::new())
        }
    };
    store.init().await.context("failed to initialize document store")?;
    Ok(store)
}
