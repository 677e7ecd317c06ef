//! Lazily opened, process-shared database pool.

use tokio::sync::OnceCell;

use crate::error::StoreError;
use crate::{create_pool, run_migrations, DbConfig, DbPool};

/// Owns the one pool a process uses.
///
/// The pool is opened (and migrations applied) on the first call to
/// [`LazyPool::connect`]. Concurrent first callers wait on the same
/// initialisation. A failed attempt leaves the cell empty so a later call
/// can retry.
#[derive(Debug)]
pub struct LazyPool {
    config: DbConfig,
    pool: OnceCell<DbPool>,
}

impl LazyPool {
    pub fn new(config: DbConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    /// Wrap an already open pool. Migrations are assumed applied.
    pub fn from_pool(config: DbConfig, pool: DbPool) -> Self {
        Self {
            config,
            pool: OnceCell::new_with(Some(pool)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    /// Return the shared pool, opening it on first use.
    pub async fn connect(&self) -> Result<&DbPool, StoreError> {
        self.pool
            .get_or_try_init(|| async {
                match open(&self.config).await {
                    Ok(pool) => {
                        tracing::info!(database = %self.config.database_name, "Database connected");
                        Ok(pool)
                    }
                    Err(e) => {
                        tracing::error!(
                            database = %self.config.database_name,
                            error = %e,
                            "Database connection error"
                        );
                        Err(e)
                    }
                }
            })
            .await
    }
}

async fn open(config: &DbConfig) -> Result<DbPool, StoreError> {
    let pool = create_pool(config).await.map_err(StoreError::Connect)?;
    run_migrations(&pool).await?;
    Ok(pool)
}
