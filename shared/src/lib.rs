//! Shared types for the inventory server
//!
//! Common types used across crates: the unified error system, the
//! product model and its request payloads, and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Product, ProductCreate, ProductType, ProductUpdate};
