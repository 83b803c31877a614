//! Server-level error types

use thiserror::Error;

/// Errors that abort server startup or shutdown
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Startup error: {0}")]
    Startup(#[from] crate::utils::AppError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
