//! Public catalog handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::Product;

/// GET /product/{sku} — public product detail lookup
///
/// Case-insensitive and owner-unscoped: anyone scanning a product's QR
/// code lands here without logging in. An unknown SKU is a plain
/// not-found, not a fault.
pub async fn get_by_sku(
    State(state): State<ServerState>,
    Path(sku): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .products
        .find_by_sku(&sku)
        .await?
        .ok_or_else(|| AppError::product_not_found(sku.as_str()))?;
    Ok(Json(product))
}
