//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::product::QrRefreshReport;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_SKU_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Product, ProductCreate, ProductUpdate};

// =============================================================================
// Product Handlers
// =============================================================================

/// GET /api/products — list the authenticated owner's products
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.products.find_all(&user.id).await?;
    Ok(Json(products))
}

/// GET /api/products/{id} — fetch one owned product
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .products
        .find_by_id(&id, &user.id)
        .await?
        .ok_or_else(|| AppError::product_not_found(id.as_str()))?;
    Ok(Json(product))
}

/// POST /api/products — create a product
///
/// A blank SKU is generated server-side; the QR reference is always
/// computed from the final SKU.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.sku, "sku", MAX_SKU_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;
    validate_optional_text(&payload.supplier, "supplier", MAX_SHORT_TEXT_LEN)?;

    let product = state.products.create(payload, &user.id).await?;

    tracing::info!(
        sku = %product.sku,
        owner = %user.id,
        "Product created"
    );
    Ok(Json(product))
}

/// PUT /api/products/{id} — partial update of an owned product
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.sku, "sku", MAX_SKU_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;
    validate_optional_text(&payload.supplier, "supplier", MAX_SHORT_TEXT_LEN)?;

    let product = state
        .products
        .update(&id, payload, &user.id)
        .await?
        .ok_or_else(|| AppError::product_not_found(id.as_str()))?;
    Ok(Json(product))
}

/// DELETE /api/products/{id} — hard delete an owned product
///
/// Idempotent: the body reports whether a record was actually removed.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let removed = state.products.delete(&id, &user.id).await?;
    Ok(Json(removed))
}

// =============================================================================
// SKU Preview
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SkuPreviewQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct SkuPreviewResponse {
    pub sku: String,
}

/// GET /api/products/sku-preview?name= — non-committal SKU preview
///
/// Skips the uniqueness check, so the value shown before saving may differ
/// from the one that is eventually persisted.
pub async fn sku_preview(
    State(state): State<ServerState>,
    Query(query): Query<SkuPreviewQuery>,
) -> Json<SkuPreviewResponse> {
    Json(SkuPreviewResponse {
        sku: state.sku.preview(&query.name),
    })
}

// =============================================================================
// QR Reference Maintenance
// =============================================================================

/// POST /api/products/qr-refresh — rewrite stale QR references
///
/// Recomputes every owned product's QR reference against the configured
/// base URL. Run after changing PUBLIC_BASE_URL or migrating legacy
/// payloads.
pub async fn qr_refresh(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<QrRefreshReport>> {
    let report = state.products.refresh_qr_references(&user.id).await?;

    tracing::info!(
        updated = report.updated,
        errors = report.errors.len(),
        owner = %user.id,
        "QR reference refresh completed"
    );
    Ok(Json(report))
}
