// src/bin/api_server.rs

use anyhow::Context;
use bizdir_api::infra::{config, store, telemetry};
use bizdir_api::transport;
use bizdir_api::ResourceService;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    // --- Store Initialization ---
    info!("initializing document store");
    let store = store::open_from_env().await?;
    for collection in ["businesses", "reviews", "photos"] {
        match store.count(collection).await {
            Ok(n) => info!(collection, documents = n, "collection ready"),
            Err(e) => error!(collection, error = %e, "could not count collection"),
        }
    }

    // --- Service Initialization ---
    let app_state = transport::http::AppState::new(ResourceService::new(store));

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    info!(address = %addr, "API server listening");
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "unable to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
