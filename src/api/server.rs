use actix_web::{web, App, HttpServer};

use super::handlers::dispatch;
use crate::config::ServerConfig;
use crate::db::OrderStore;

/// Register the catch-all dispatcher. Routing is done by `router::route`
/// rather than actix's matcher so every method/path pair, including the
/// unmatched ones, goes through the same rules.
pub fn configure(store: web::Data<dyn OrderStore>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(store).default_service(web::to(dispatch));
    }
}

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: &ServerConfig, store: web::Data<dyn OrderStore>) -> std::io::Result<()> {
    tracing::info!("🚀 Starting order service on http://{}:{}", config.host, config.port);

    HttpServer::new(move || App::new().configure(configure(store.clone())))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
