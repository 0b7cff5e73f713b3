//! Centralized configuration (environment variables + defaults).

use anyhow::Context;

/// Which document store the binaries open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" | "in-memory" => Ok(Self::Memory),
            other => Err(anyhow::anyhow!(
                "STORE_BACKEND must be one of: postgres, memory (got '{}')",
                other
            )),
        }
    }
}

/// Store backend (default: postgres).
pub fn store_backend() -> anyhow::Result<StoreBackend> {
    match std::env::var("STORE_BACKEND") {
        Ok(v) => StoreBackend::parse(&v),
        Err(_) => Ok(StoreBackend::Postgres),
    }
}

/// Database URL must be provided (no default) when the postgres backend is used.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// Pool size for the postgres backend (default: 5).
pub fn db_max_connections() -> anyhow::Result<u32> {
    match std::env::var("DB_MAX_CONNECTIONS") {
        Ok(v) => v
            .parse::<u32>()
            .map(|n| n.max(1))
            .context("DB_MAX_CONNECTIONS must be a valid u32"),
        Err(_) => Ok(5),
    }
}

/// Listen address of the API server (default: 0.0.0.0:3000).
pub fn bind_addr() -> String {
    std::env::var("API_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

/// Fixture file for the `seed` binary, if configured.
pub fn seed_file() -> Option<String> {
    std::env::var("SEED_FILE").ok()
}
