use actix_web::web;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod db;
mod domain;
mod utils;

use config::Config;
use db::{OrderStore, PgOrderStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_service=debug")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(server = ?config.server, "📦 Starting order service");

    // === 1. Connect to PostgreSQL (bounded retry) ===
    let store = match db::connect_with_retry(&config.database).await {
        Ok(pool) => {
            let store = PgOrderStore::new(pool);
            // === 2. Best-effort schema creation ===
            if let Err(e) = store.ensure_schema().await {
                tracing::warn!(error = %e, "Schema initialization failed; retrying on first request");
            }
            store
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Database unreachable at startup; serving with a lazily connecting pool"
            );
            PgOrderStore::new(db::connect_lazy(&config.database))
        }
    };

    // === 3. Serve HTTP ===
    let store: web::Data<dyn OrderStore> =
        web::Data::from(Arc::new(store) as Arc<dyn OrderStore>);
    api::start_server(&config.server, store).await?;

    tracing::info!("Order service stopped");
    Ok(())
}
