use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every option can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/inventory-server | Work directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | PUBLIC_BASE_URL | http://localhost:3000 | Base URL baked into QR references |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOW_STOCK_THRESHOLD | 20 | Reorder flag threshold (stock below) |
/// | CRITICAL_STOCK_THRESHOLD | 10 | Critical flag threshold (stock below) |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/inventory HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Base URL for generated QR references; point this at the public
    /// deployment so scanned codes resolve outside the LAN
    pub public_base_url: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Stock below this count is flagged for reordering
    pub low_stock_threshold: i64,
    /// Stock below this count is flagged as critical in detail views
    pub critical_stock_threshold: i64,
    /// JWT validation configuration
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/inventory-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            low_stock_threshold: std::env::var("LOW_STOCK_THRESHOLD")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(20),
            critical_stock_threshold: std::env::var("CRITICAL_STOCK_THRESHOLD")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            jwt: JwtConfig::default(),
        }
    }

    /// Override parts of the configuration, mainly for tests
    pub fn with_overrides(
        work_dir: impl Into<String>,
        http_port: u16,
        public_base_url: impl Into<String>,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.public_base_url = public_base_url.into();
        config
    }

    /// Directory the embedded database lives in
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Create the work directory layout if it does not exist yet
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
