use std::future::Future;

use sqlx::PgPool;
use tokio::sync::OnceCell;

const CREATE_ORDERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id BIGSERIAL PRIMARY KEY,
        user_id INT NOT NULL,
        book_id INT NOT NULL,
        quantity INT NOT NULL DEFAULT 1,
        status VARCHAR(50) NOT NULL DEFAULT 'pending',
        order_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        total_price NUMERIC(10, 2)
    )
"#;

/// Create the `orders` table if it is missing. Safe to run repeatedly.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_ORDERS_TABLE).execute(pool).await?;
    tracing::info!("Orders table ready");
    Ok(())
}

/// Tracks whether the schema has been created in this process. A failed
/// attempt leaves the guard unset so the next caller tries again; once an
/// attempt succeeds it is never repeated.
#[derive(Debug, Default)]
pub struct SchemaGuard {
    ready: OnceCell<()>,
}

impl SchemaGuard {
    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    pub async fn ensure_with<F, Fut>(&self, init: F) -> Result<(), sqlx::Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), sqlx::Error>>,
    {
        self.ready.get_or_try_init(init).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_ddl_is_idempotent_and_complete() {
        assert!(CREATE_ORDERS_TABLE.contains("CREATE TABLE IF NOT EXISTS orders"));
        for column in [
            "id",
            "user_id",
            "book_id",
            "quantity",
            "status",
            "order_date",
            "total_price",
        ] {
            assert!(
                CREATE_ORDERS_TABLE.contains(&format!("{column} ")),
                "missing column {column}"
            );
        }
    }

    #[tokio::test]
    async fn test_guard_retries_until_success() {
        let guard = SchemaGuard::default();
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let attempt = move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(sqlx::Error::PoolTimedOut)
            } else {
                Ok(())
            }
        };

        assert!(guard.ensure_with(attempt).await.is_err());
        assert!(!guard.is_ready());

        guard.ensure_with(attempt).await.unwrap();
        assert!(guard.is_ready());

        // Already initialized, so no further attempt is made
        guard.ensure_with(attempt).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_ensure_schema_twice() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("connect failed");

        ensure_schema(&pool).await.expect("first run");
        ensure_schema(&pool).await.expect("second run");
    }
}
