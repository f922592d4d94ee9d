use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, TransactionSession};

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Connect to the store and bring the schema in line with `crate::entity`.
pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    sync_schema(&db).await?;

    Ok(db)
}

/// Create missing tables, columns and constraints for every registered entity.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.get_schema_registry("stockroom::entity::*")
        .sync(db)
        .await
}

/// Commit `txn` when `result` is `Ok`, otherwise roll it back explicitly
/// before handing the original error back.
pub async fn finish<X: TransactionSession, T>(
    txn: X,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(e) = txn.rollback().await {
                tracing::warn!(error = %e, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
