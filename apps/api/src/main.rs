use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    // Select the storage backend: DATABASE_URL present means the durable
    // PostgreSQL variant, otherwise the process-local in-memory store.
    let db = match config.database.clone() {
        Some(pg_config) => {
            info!("Connecting to PostgreSQL");
            let db = database::postgres::connect_from_config_with_retry(pg_config, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            // Schema must exist before the first request
            database::postgres::run_migrations::<migration::Migrator>(&db, "catalog_api")
                .await
                .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

            Some(db)
        }
        None => {
            info!("DATABASE_URL not set, items are stored in process memory");
            None
        }
    };

    // Initialize the application state with the selected backend
    let state = AppState { config, db };

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.api.prefix)
            .await?;

    // Merge health endpoints into the app
    // - /: liveness check with timestamp and app name/version
    // - /ping: plain pong
    // - /ready: readiness check probing the active storage backend
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    info!(
        "Starting {} v{} on {}",
        state.config.app.name,
        state.config.app.version,
        state.config.server.address()
    );

    // Production-ready server with graceful shutdown and cleanup.
    // The database handle moves here for cleanup.
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30), // 30s graceful shutdown timeout
        async move {
            if let Some(db) = state.db {
                info!("Shutting down: closing database connection");
                match db.close().await {
                    Ok(_) => info!("PostgreSQL connection closed successfully"),
                    Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
                }
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
