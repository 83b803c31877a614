use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::ProductRepository;
use crate::sku::SkuGenerator;
use crate::utils::AppError;

/// Server state — shared handles to every service
///
/// One instance is constructed at startup and cloned into handlers; all
/// members are cheap to clone (`Arc` or handle types). There is no global
/// singleton: tests build isolated states over temporary databases.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | Immutable configuration |
/// | db | Surreal<Db> | Embedded database handle |
/// | products | ProductRepository | Product CRUD, constructed once |
/// | sku | Arc<SkuGenerator> | SKU generation (seedable random source) |
/// | jwt_service | Arc<JwtService> | Token validation |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub products: ProductRepository,
    pub sku: Arc<SkuGenerator>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// Ensures the work directory layout exists, opens the database and
    /// wires the repository with the shared SKU generator.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_service = DbService::new(&config.database_dir()).await?;

        let sku = Arc::new(SkuGenerator::new());
        let products = ProductRepository::new(
            db_service.db.clone(),
            sku.clone(),
            config.public_base_url.clone(),
        );
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            products,
            sku,
            jwt_service,
        })
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
