//! Loads fixture data into the configured store.
//!
//! Usage: `seed [FILE]` (or `SEED_FILE=...`). The file holds
//! `{ "businesses": [...], "reviews": [...], "photos": [...] }`; every entry goes
//! through the same validation as an API create, so ids are assigned by the store.

use anyhow::Context;
use bizdir_api::infra::{config, store, telemetry};
use bizdir_api::{ResourceModel, ResourceService, ServiceError, BUSINESS, PHOTO, REVIEW};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

#[derive(Deserialize, Default)]
struct SeedFile {
    #[serde(default)]
    businesses: Vec<JsonValue>,
    #[serde(default)]
    reviews: Vec<JsonValue>,
    #[serde(default)]
    photos: Vec<JsonValue>,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin seed -- <fixture.json>\n\
         \n\
         The fixture path may also come from SEED_FILE.\n\
         Store selection uses STORE_BACKEND / DATABASE_URL like api_server.\n"
    );
    std::process::exit(2);
}

async fn seed_all(
    service: &ResourceService,
    model: &dyn ResourceModel,
    entries: &[JsonValue],
) -> anyhow::Result<(usize, usize)> {
    let mut created = 0;
    let mut skipped = 0;
    for (idx, entry) in entries.iter().enumerate() {
        match service.create(model, entry).await {
            Ok(_) => created += 1,
            Err(ServiceError::Store(e)) => {
                return Err(e.context(format!("store failed on {} #{}", model.resource_name(), idx)));
            }
            Err(e) => {
                warn!(resource = model.resource_name(), index = idx, reason = %e, "skipped entry");
                skipped += 1;
            }
        }
    }
    Ok((created, skipped))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let Some(path) = args.first().cloned().or_else(config::seed_file) else {
        usage_and_exit();
    };

    let raw = std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?;
    let fixtures: SeedFile =
        serde_json::from_str(&raw).with_context(|| format!("{} is not a valid seed file", path))?;

    let store = store::open_from_env().await?;
    let service = ResourceService::new(store);

    for (model, entries) in [
        (&BUSINESS as &dyn ResourceModel, &fixtures.businesses),
        (&REVIEW as &dyn ResourceModel, &fixtures.reviews),
        (&PHOTO as &dyn ResourceModel, &fixtures.photos),
    ] {
        let (created, skipped) = seed_all(&service, model, entries).await?;
        info!(collection = model.collection(), created, skipped, "seeded");
    }

    Ok(())
}
