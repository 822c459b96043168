use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::utils::retry_with_backoff;

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
}

/// Open the connection pool, retrying with a fixed delay until the database
/// accepts a connection or the attempt budget is spent. On exhaustion the
/// last connect error is returned.
pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.name,
        max_attempts = config.connect_attempts,
        "Connecting to PostgreSQL"
    );

    let options = config.connect_options();
    retry_with_backoff(config.retry_config(), |attempt| {
        let options = options.clone();
        async move {
            tracing::debug!(attempt = attempt, "Opening database pool");
            pool_options(config).connect_with(options).await
        }
    })
    .await
    .into_result()
}

/// Pool that opens connections on first use. Used when the startup connect
/// loop gave up so the service can still answer requests.
pub fn connect_lazy(config: &DatabaseConfig) -> PgPool {
    pool_options(config).connect_lazy_with(config.connect_options())
}
