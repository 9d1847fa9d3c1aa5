//! Readiness probe that runs `SELECT 1` against the pool.

use async_trait::async_trait;
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{StorageProbe, StorageStatus};

use super::pool::DbPool;

/// Reports [`StorageStatus::Up`] when a pooled connection answers a trivial
/// query.
#[derive(Clone)]
pub struct DieselStorageProbe {
    pool: DbPool,
}

impl DieselStorageProbe {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageProbe for DieselStorageProbe {
    async fn check(&self) -> StorageStatus {
        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(err) => {
                warn!(error = %err, "storage probe could not check out a connection");
                return StorageStatus::Down {
                    message: err.to_string(),
                };
            }
        };
        match diesel::select(diesel::dsl::sql::<Integer>("1"))
            .get_result::<i32>(&mut conn)
            .await
        {
            Ok(_) => StorageStatus::Up,
            Err(err) => {
                warn!(error = %err, "storage probe query failed");
                StorageStatus::Down {
                    message: err.to_string(),
                }
            }
        }
    }
}
