//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) storage under the configured work
//! directory.

pub mod models;
pub mod repository;

use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "inventory";
const DATABASE: &str = "inventory";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database under `db_dir` and define the schema
    pub async fn new(db_dir: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!(path = %db_dir.display(), "Database connection established (SurrealDB/RocksDB)");
        Ok(Self { db })
    }
}

/// Define the product table and its indexes
///
/// The UNIQUE index on (owner_id, sku) backstops the SKU generator's
/// best-effort probe loop under concurrent creation.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query("DEFINE TABLE IF NOT EXISTS product")
        .await
        .and_then(|r| r.check())
        .map_err(|e| AppError::database(format!("Failed to define product table: {e}")))?;

    db.query(
        "DEFINE INDEX IF NOT EXISTS product_owner_sku ON TABLE product COLUMNS owner_id, sku UNIQUE",
    )
    .await
    .and_then(|r| r.check())
    .map_err(|e| AppError::database(format!("Failed to define product indexes: {e}")))?;

    Ok(())
}
