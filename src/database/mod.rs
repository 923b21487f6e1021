pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use tracing::info;

use crate::config::{Config, StorageKind};
use crate::error::Result;
use memory::MemorySalaryStore;
use postgres::PgSalaryStore;
use store::SalaryStore;

/// Opens the configured backend. Postgres runs pending migrations first.
pub async fn open_store(config: &Config) -> Result<Arc<dyn SalaryStore>> {
    match config.storage {
        StorageKind::Postgres => {
            let pool = pool::create_pool(config).await?;
            pool::run_migrations(&pool).await?;
            info!("Using PostgreSQL salary store");
            Ok(Arc::new(PgSalaryStore::new(pool)))
        }
        StorageKind::Memory => {
            info!("Using in-memory salary store; records are lost on restart");
            Ok(Arc::new(MemorySalaryStore::new()))
        }
    }
}
